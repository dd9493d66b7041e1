//! Data model for schema-driven tabular imports.
//!
//! The types here are plain data: schemas and their fields, the column
//! mapping a user builds, raw rows read from a file, and the records and
//! reports the engine produces from them.

pub mod error;
pub mod field;
pub mod mapping;
pub mod outcome;
pub mod report;
pub mod row;
pub mod schema;
pub mod value;

pub use error::{ModelError, Result};
pub use field::{FieldDefinition, FieldKind};
pub use mapping::{Mapping, MappingEntry};
pub use outcome::{FieldError, ProcessedRecord, RejectedRecord, ValidationOutcome};
pub use report::{MappingIssue, MappingReport, SampleCellError, SampleRowErrors};
pub use row::RawRow;
pub use schema::{SchemaDefinition, SchemaSummary};
pub use value::FieldValue;
