//! Error types for schema loading and lookup.

use std::path::PathBuf;

use tabmap_model::ModelError;
use thiserror::Error;

/// Errors raised by a [`SchemaProvider`](crate::SchemaProvider) while
/// producing schema definitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaSourceError {
    /// Schema directory not found.
    #[error("Schema directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse a CSV file.
    #[error("Failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in a CSV column.
    #[error("Invalid {column} value '{value}' in {file}")]
    InvalidValue {
        column: &'static str,
        value: String,
        file: String,
    },

    /// The definitions form an inconsistent schema.
    #[error("Invalid schema definition in {file}: {source}")]
    InvalidSchema {
        file: String,
        #[source]
        source: ModelError,
    },
}

/// Errors returned by [`SchemaCatalog`](crate::SchemaCatalog) lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Schema not found: {name}")]
    NotFound { name: String },

    #[error("Schema source unavailable: {source}")]
    Unavailable {
        #[from]
        source: SchemaSourceError,
    },
}

pub type Result<T> = std::result::Result<T, SchemaSourceError>;
