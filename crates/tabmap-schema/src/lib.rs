//! Schema providers and catalog.
//!
//! Schemas are described by two CSV files:
//!
//! ```text
//! schemas/
//! ├── Schemas.csv   # Schema Name, Schema Label, Description
//! └── Fields.csv    # Field Order, Schema Name, Field Name, Field Label, Kind,
//!                   # Required, Max Length, Allowed Values, Related Schema
//! ```
//!
//! A built-in set of sample schemas ships in the binary; point
//! `TABMAP_SCHEMA_DIR` at a directory with the same layout to use your own.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabmap_schema::{EmbeddedProvider, SchemaCatalog};
//!
//! let catalog = SchemaCatalog::new(EmbeddedProvider);
//! let customer = catalog.get_schema("customer")?;
//! println!("{} has {} fields", customer.name, customer.len());
//! ```

pub mod catalog;
pub mod embedded;
pub mod error;
pub mod loader;
pub mod provider;

pub use catalog::SchemaCatalog;
pub use error::{CatalogError, SchemaSourceError};
pub use provider::{
    DirectoryProvider, EmbeddedProvider, InMemoryProvider, SCHEMA_DIR_ENV_VAR, SchemaProvider,
    resolve_provider,
};
