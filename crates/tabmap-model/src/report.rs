use serde::Serialize;

/// A mapping entry that points at a field the schema does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingIssue {
    pub source_column: String,
    pub target_field: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleCellError {
    pub source_column: String,
    pub field: String,
    pub value: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleRowErrors {
    pub row_index: usize,
    pub errors: Vec<SampleCellError>,
}

/// Dry-run assessment of a mapping against a schema and a few sample rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingReport {
    pub missing_required_fields: Vec<String>,
    pub mapping_errors: Vec<MappingIssue>,
    pub sample_row_errors: Vec<SampleRowErrors>,
    pub unmapped_columns: Vec<String>,
    /// Percentage in `0.0..=100.0`, two decimals.
    pub score: f64,
}

impl MappingReport {
    /// No mapping errors and every required field covered.
    ///
    /// Sample row errors do not affect validity.
    pub fn is_valid(&self) -> bool {
        self.mapping_errors.is_empty() && self.missing_required_fields.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.mapping_errors.len() + self.missing_required_fields.len()
    }

    pub fn sample_error_count(&self) -> usize {
        self.sample_row_errors.iter().map(|row| row.errors.len()).sum()
    }
}
