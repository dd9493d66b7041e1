//! Import pipeline for tabular data.
//!
//! Builds on the collaborator crates:
//! - `tabmap-schema` for schema lookup
//! - `tabmap-ingest` for reading CSV and spreadsheet files
//! - `tabmap-map` for mapping suggestions
//! - `tabmap-validate` for per-value validation and mapping reports
//!
//! and adds batch processing, import sessions and JSON export.

pub mod error;
pub mod export;
pub mod processor;
pub mod service;
pub mod session;

pub use error::{ExportError, ImportError, SessionError};
pub use export::{ExportPaths, processed_json, rejected_json, write_outputs};
pub use processor::{BatchOutcome, ProcessOptions, process, process_with_options};
pub use service::{Importer, mapping_from_suggestions};
pub use session::{FileSessionStore, ImportSession, MemorySessionStore, SessionStore};
