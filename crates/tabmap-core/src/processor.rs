//! Full-file processing: every row is either processed or rejected.

use rayon::prelude::*;
use serde::Serialize;
use tabmap_model::{
    FieldError, Mapping, ProcessedRecord, RawRow, RejectedRecord, SchemaDefinition,
};
use tabmap_validate::{REQUIRED_MESSAGE, validate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Validate rows on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

/// Outcome of a batch run, in input row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub processed: Vec<ProcessedRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchOutcome {
    pub fn valid_count(&self) -> usize {
        self.processed.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn total_rows(&self) -> usize {
        self.processed.len() + self.rejected.len()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

enum RowResult {
    Processed(ProcessedRecord),
    Rejected(RejectedRecord),
}

/// Apply `mapping` to every row sequentially.
pub fn process(schema: &SchemaDefinition, mapping: &Mapping, rows: &[RawRow]) -> BatchOutcome {
    process_with_options(schema, mapping, rows, ProcessOptions::default())
}

pub fn process_with_options(
    schema: &SchemaDefinition,
    mapping: &Mapping,
    rows: &[RawRow],
    options: ProcessOptions,
) -> BatchOutcome {
    let results: Vec<RowResult> = if options.parallel {
        rows.par_iter()
            .enumerate()
            .map(|(idx, row)| process_row(schema, mapping, idx, row))
            .collect()
    } else {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| process_row(schema, mapping, idx, row))
            .collect()
    };

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            RowResult::Processed(record) => outcome.processed.push(record),
            RowResult::Rejected(record) => outcome.rejected.push(record),
        }
    }
    outcome
}

/// Entries whose target is not in the schema are skipped; absent cells read
/// as empty. A required field that no column targets rejects the row.
fn process_row(
    schema: &SchemaDefinition,
    mapping: &Mapping,
    row_index: usize,
    row: &RawRow,
) -> RowResult {
    let mut record = ProcessedRecord::new();
    let mut errors = Vec::new();

    for (column, target) in mapping.mapped() {
        let Some(field) = schema.field(target) else {
            continue;
        };
        let value = row.value(column);
        let outcome = validate(field, value);
        if outcome.is_valid() {
            record.insert(target, outcome.converted_value().cloned());
        } else {
            errors.push(FieldError {
                field: target.to_string(),
                value: value.to_string(),
                error: outcome.error_message().unwrap_or_default().to_string(),
            });
        }
    }

    for field in schema.required_fields() {
        if !mapping.targets_field(&field.name) {
            errors.push(FieldError {
                field: field.name.clone(),
                value: String::new(),
                error: REQUIRED_MESSAGE.to_string(),
            });
        }
    }

    if errors.is_empty() {
        RowResult::Processed(record)
    } else {
        RowResult::Rejected(RejectedRecord {
            row_index,
            raw_row: row.clone(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use tabmap_model::{FieldDefinition, FieldKind};

    use super::*;

    #[test]
    fn unknown_targets_are_ignored() {
        let schema = SchemaDefinition::new(
            "T",
            vec![FieldDefinition::new("name", FieldKind::Text)],
        )
        .expect("schema");
        let mapping = Mapping::from_entries([("Name", Some("name")), ("Fax", Some("fax"))]);
        let rows: Vec<RawRow> = vec![[("Name", "Ada"), ("Fax", "x")].into_iter().collect()];
        let outcome = process(&schema, &mapping, &rows);
        assert_eq!(outcome.valid_count(), 1);
        assert_eq!(outcome.processed[0].len(), 1);
    }

    #[test]
    fn missing_column_counts_as_empty() {
        let schema = SchemaDefinition::new(
            "T",
            vec![FieldDefinition::new("name", FieldKind::Text).required(true)],
        )
        .expect("schema");
        let mapping = Mapping::from_entries([("Name", Some("name"))]);
        let rows = vec![RawRow::new()];
        let outcome = process(&schema, &mapping, &rows);
        assert_eq!(outcome.invalid_count(), 1);
        assert_eq!(outcome.rejected[0].errors[0].error, "required field missing");
    }
}
