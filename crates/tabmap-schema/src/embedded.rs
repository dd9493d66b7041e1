//! Built-in sample schemas, compiled into the binary.

/// Schemas.csv: one row per schema.
pub const SCHEMAS_CSV: &str = include_str!("../data/Schemas.csv");

/// Fields.csv: one row per field, grouped by schema.
pub const FIELDS_CSV: &str = include_str!("../data/Fields.csv");
