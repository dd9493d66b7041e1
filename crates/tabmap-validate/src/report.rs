//! Dry-run mapping report.

use tabmap_model::{
    Mapping, MappingIssue, MappingReport, RawRow, SampleCellError, SampleRowErrors,
    SchemaDefinition,
};

use crate::field::validate;

/// Default number of rows checked by [`evaluate`].
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub max_sample_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// Assess `mapping` against `schema` and the first sample rows.
///
/// Advisory only: the report never prevents a full run.
pub fn evaluate(
    schema: &SchemaDefinition,
    mapping: &Mapping,
    rows: &[RawRow],
    options: &ReportOptions,
) -> MappingReport {
    let missing_required_fields: Vec<String> = schema
        .required_fields()
        .filter(|field| !mapping.targets_field(&field.name))
        .map(|field| field.name.clone())
        .collect();

    let mapping_errors: Vec<MappingIssue> = mapping
        .mapped()
        .filter(|(_, target)| !schema.contains_field(target))
        .map(|(column, target)| MappingIssue {
            source_column: column.to_string(),
            target_field: target.to_string(),
            error: format!("Field {target} does not exist"),
        })
        .collect();

    let sample_row_errors = rows
        .iter()
        .take(options.max_sample_rows)
        .enumerate()
        .filter_map(|(row_index, row)| {
            let errors: Vec<SampleCellError> = mapping
                .mapped()
                .filter_map(|(column, target)| {
                    let field = schema.field(target)?;
                    let value = row.get(column)?;
                    let outcome = validate(field, value);
                    if outcome.is_valid() {
                        return None;
                    }
                    Some(SampleCellError {
                        source_column: column.to_string(),
                        field: target.to_string(),
                        value: value.to_string(),
                        error: outcome.error_message().unwrap_or_default().to_string(),
                    })
                })
                .collect();
            (!errors.is_empty()).then_some(SampleRowErrors { row_index, errors })
        })
        .collect();

    let unmapped_columns = mapping.unmapped_columns().map(str::to_string).collect();

    let total_checks = mapping.len() + schema.required_fields().count();
    let error_count = mapping_errors.len() + missing_required_fields.len();
    let score = mapping_score(total_checks, error_count);

    MappingReport {
        missing_required_fields,
        mapping_errors,
        sample_row_errors,
        unmapped_columns,
        score,
    }
}

/// `(total - errors) / total * 100`, floored at zero and rounded to two
/// decimals; zero when there is nothing to check.
pub fn mapping_score(total_checks: usize, error_count: usize) -> f64 {
    if total_checks == 0 {
        return 0.0;
    }
    let raw = (total_checks as f64 - error_count as f64) / total_checks as f64 * 100.0;
    (raw.max(0.0) * 100.0).round() / 100.0
}
