//! Error types for the import pipeline.

use std::path::PathBuf;

use tabmap_ingest::IngestError;
use tabmap_schema::{CatalogError, SchemaSourceError};
use thiserror::Error;
use uuid::Uuid;

/// Fatal import failures. Per-cell and mapping problems are data, not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// No schema with this name in the catalog.
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// The schema provider failed.
    #[error("Schema source unavailable: {source}")]
    SchemaUnavailable {
        #[source]
        source: SchemaSourceError,
    },

    /// Extension is not CSV or a spreadsheet format.
    #[error("Unsupported file type '{extension}'. Please upload a CSV or Excel file")]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// The source file exists but could not be read or parsed.
    #[error("Error reading file: {source}")]
    FileReadFailure {
        #[source]
        source: IngestError,
    },
}

impl From<CatalogError> for ImportError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { name } => ImportError::SchemaNotFound { name },
            CatalogError::Unavailable { source } => ImportError::SchemaUnavailable { source },
        }
    }
}

impl From<IngestError> for ImportError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedFileType { path, extension } => {
                ImportError::UnsupportedFileType { path, extension }
            }
            other => ImportError::FileReadFailure { source: other },
        }
    }
}

/// Errors raised by a [`SessionStore`](crate::SessionStore).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session storage {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session not found: {id}")]
    NotFound { id: Uuid },
}

/// Errors raised while writing export files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_import_kinds() {
        let err: ImportError = CatalogError::NotFound {
            name: "Invoice".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Schema not found: Invoice");

        let err: ImportError = CatalogError::from(SchemaSourceError::DirectoryNotFound {
            path: PathBuf::from("/missing"),
        })
        .into();
        assert!(matches!(err, ImportError::SchemaUnavailable { .. }));
    }

    #[test]
    fn ingest_errors_map_to_import_kinds() {
        let err: ImportError = IngestError::UnsupportedFileType {
            path: PathBuf::from("data.txt"),
            extension: "txt".to_string(),
        }
        .into();
        assert!(matches!(err, ImportError::UnsupportedFileType { .. }));

        let err: ImportError = IngestError::FileNotFound {
            path: PathBuf::from("gone.csv"),
        }
        .into();
        assert!(matches!(err, ImportError::FileReadFailure { .. }));
        assert!(err.to_string().starts_with("Error reading file"));
    }
}
