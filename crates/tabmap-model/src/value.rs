use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const DATETIME_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// A converted cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
}

impl FieldValue {
    /// Canonical string form, used for allowed-value checks and export.
    pub fn canonical(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Decimal(d) => d.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            FieldValue::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
            FieldValue::DateTimeOffset(dt) => dt.format(DATETIME_OFFSET_FORMAT).to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Integers and booleans are JSON numbers and booleans; everything else,
/// decimals included, is written as its canonical string.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Integer(i) => serializer.serialize_i64(*i),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Text(s) => serializer.serialize_str(s),
            other => serializer.serialize_str(&other.canonical()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn canonical_forms() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(FieldValue::Date(date).canonical(), "2024-03-09");

        let dt = date.and_hms_opt(14, 5, 0).expect("time");
        assert_eq!(FieldValue::DateTime(dt).canonical(), "2024-03-09T14:05:00");

        let offset = DateTime::parse_from_rfc3339("2024-03-09T14:05:00.250+02:00").expect("rfc3339");
        assert_eq!(
            FieldValue::DateTimeOffset(offset).canonical(),
            "2024-03-09T14:05:00.250+02:00"
        );

        let decimal = Decimal::from_str("19.990").expect("decimal");
        assert_eq!(FieldValue::Decimal(decimal).canonical(), "19.990");
    }

    #[test]
    fn serializes_as_json_scalars() {
        let values = vec![
            FieldValue::Integer(42),
            FieldValue::Boolean(true),
            FieldValue::Decimal(Decimal::from_str("0.10").expect("decimal")),
            FieldValue::Text("hi".to_string()),
        ];
        let json = serde_json::to_string(&values).expect("serialize");
        assert_eq!(json, r#"[42,true,"0.10","hi"]"#);
    }
}
