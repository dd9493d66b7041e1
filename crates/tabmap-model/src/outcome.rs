use indexmap::IndexMap;
use serde::Serialize;

use crate::row::RawRow;
use crate::value::FieldValue;

/// Result of validating one raw value against one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    valid: bool,
    converted_value: Option<FieldValue>,
    error_message: Option<String>,
}

impl ValidationOutcome {
    pub fn success(value: FieldValue) -> Self {
        Self {
            valid: true,
            converted_value: Some(value),
            error_message: None,
        }
    }

    /// Valid with no value: an optional field left empty.
    pub fn empty() -> Self {
        Self {
            valid: true,
            converted_value: None,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            converted_value: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn converted_value(&self) -> Option<&FieldValue> {
        self.converted_value.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn into_result(self) -> Result<Option<FieldValue>, String> {
        if self.valid {
            Ok(self.converted_value)
        } else {
            Err(self.error_message.unwrap_or_default())
        }
    }
}

/// A fully valid row keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProcessedRecord {
    values: IndexMap<String, Option<FieldValue>>,
}

impl ProcessedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        self.values.insert(field.into(), value);
    }

    /// Converted value for `field`; `None` when absent or null.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field).and_then(Option::as_ref)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub error: String,
}

/// A row that failed validation, with every field error it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Zero-based position among the data rows.
    pub row_index: usize,
    pub raw_row: RawRow,
    pub errors: Vec<FieldError>,
}

impl RejectedRecord {
    /// One-based data row number, as shown to users.
    pub fn row_number(&self) -> usize {
        self.row_index + 1
    }
}
