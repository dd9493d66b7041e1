//! Validation and conversion of one raw value against one field.

use std::sync::LazyLock;

use regex::Regex;
use tabmap_model::{FieldDefinition, FieldKind, FieldValue, ValidationOutcome};

use crate::datetime::{parse_date, parse_datetime};
use crate::numeric::{NumericError, parse_decimal, parse_integer};

pub const REQUIRED_MESSAGE: &str = "required field missing";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

const TRUE_VALUES: &[&str] = &["true", "1", "yes", "on"];
const FALSE_VALUES: &[&str] = &["false", "0", "no", "off"];

/// Validate `raw` against `field`, converting it to the field's kind.
///
/// The value is trimmed first; whitespace-only input counts as empty.
/// Never panics: every failure is reported through the outcome.
pub fn validate(field: &FieldDefinition, raw: &str) -> ValidationOutcome {
    let value = raw.trim();
    if value.is_empty() {
        return if field.required {
            ValidationOutcome::failure(REQUIRED_MESSAGE)
        } else {
            ValidationOutcome::empty()
        };
    }

    let converted = match convert(field, value) {
        Ok(converted) => converted,
        Err(message) => return ValidationOutcome::failure(message),
    };

    if let Some(allowed) = field.allowed_values.as_ref().filter(|v| !v.is_empty())
        && !allowed.contains(&converted.canonical())
    {
        let choices: Vec<&str> = allowed.iter().map(String::as_str).collect();
        return ValidationOutcome::failure(format!(
            "Invalid choice. Must be one of: {}",
            choices.join(", ")
        ));
    }

    ValidationOutcome::success(converted)
}

fn convert(field: &FieldDefinition, value: &str) -> Result<FieldValue, String> {
    match field.kind {
        FieldKind::Integer => match parse_integer(value) {
            Ok(parsed) => Ok(FieldValue::Integer(parsed)),
            Err(NumericError::OutOfRange) => {
                Err("Validation error: integer out of range".to_string())
            }
            Err(NumericError::Invalid | NumericError::NotIntegral) => {
                Err(format!("Invalid integer value: {value}"))
            }
        },
        FieldKind::Decimal => parse_decimal(value)
            .map(FieldValue::Decimal)
            .ok_or_else(|| format!("Invalid numeric value: {value}")),
        FieldKind::Boolean => parse_bool(value)
            .map(FieldValue::Boolean)
            .ok_or_else(|| format!("Invalid boolean value: {value}")),
        FieldKind::Text | FieldKind::Choice => {
            check_length(field, value)?;
            Ok(FieldValue::Text(value.to_string()))
        }
        FieldKind::Email => {
            if !EMAIL_REGEX.is_match(value) {
                return Err(format!("Invalid email format: {value}"));
            }
            check_length(field, value)?;
            Ok(FieldValue::Text(value.to_string()))
        }
        FieldKind::Date => parse_date(value)
            .map(FieldValue::Date)
            .ok_or_else(|| format!("Invalid date/datetime format: {value}")),
        FieldKind::DateTime => parse_datetime(value)
            .map(|ts| ts.into_field_value())
            .ok_or_else(|| format!("Invalid date/datetime format: {value}")),
    }
}

fn check_length(field: &FieldDefinition, value: &str) -> Result<(), String> {
    match field.max_length {
        Some(max) if value.chars().count() > max => {
            Err(format!("Text too long (max {max} characters)"))
        }
        _ => Ok(()),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let lowered = value.to_lowercase();
    if TRUE_VALUES.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_VALUES.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind) -> FieldDefinition {
        FieldDefinition::new("f", kind)
    }

    fn converted(outcome: &ValidationOutcome) -> Option<String> {
        outcome.converted_value().map(FieldValue::canonical)
    }

    #[test]
    fn empty_respects_required() {
        let optional = field(FieldKind::Integer);
        let outcome = validate(&optional, "   ");
        assert!(outcome.is_valid());
        assert_eq!(outcome.converted_value(), None);

        let required = field(FieldKind::Text).required(true);
        let outcome = validate(&required, "");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.error_message(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn booleans() {
        let flag = field(FieldKind::Boolean);
        assert_eq!(
            validate(&flag, "YES").converted_value(),
            Some(&FieldValue::Boolean(true))
        );
        assert_eq!(
            validate(&flag, "0").converted_value(),
            Some(&FieldValue::Boolean(false))
        );
        assert_eq!(
            validate(&flag, "Off").converted_value(),
            Some(&FieldValue::Boolean(false))
        );
        let outcome = validate(&flag, "maybe");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.error_message(), Some("Invalid boolean value: maybe"));
    }

    #[test]
    fn integers() {
        let number = field(FieldKind::Integer);
        assert_eq!(converted(&validate(&number, "42.0")), Some("42".to_string()));
        assert_eq!(
            validate(&number, "42.5").error_message(),
            Some("Invalid integer value: 42.5")
        );
        assert_eq!(
            validate(&number, "99999999999999999999").error_message(),
            Some("Validation error: integer out of range")
        );
    }

    #[test]
    fn decimals_keep_precision() {
        let price = field(FieldKind::Decimal);
        assert_eq!(converted(&validate(&price, "19.990")), Some("19.990".to_string()));
        assert_eq!(
            validate(&price, "12,50").error_message(),
            Some("Invalid numeric value: 12,50")
        );
    }

    #[test]
    fn text_length_counts_characters() {
        let name = field(FieldKind::Text).with_max_length(4);
        assert!(validate(&name, "Zoë!").is_valid());
        assert_eq!(
            validate(&name, "Zoë!!").error_message(),
            Some("Text too long (max 4 characters)")
        );
    }

    #[test]
    fn emails() {
        let email = field(FieldKind::Email);
        assert!(validate(&email, "a.b+c@example.co.uk").is_valid());
        assert_eq!(
            validate(&email, "bad").error_message(),
            Some("Invalid email format: bad")
        );
        assert!(!validate(&email, "a@b.c").is_valid());
    }

    #[test]
    fn dates_normalize() {
        let joined = field(FieldKind::Date);
        assert_eq!(
            converted(&validate(&joined, "01/15/2024")),
            Some("2024-01-15".to_string())
        );
        assert_eq!(
            validate(&joined, "someday").error_message(),
            Some("Invalid date/datetime format: someday")
        );
        let created = field(FieldKind::DateTime);
        assert_eq!(
            converted(&validate(&created, "2024-01-15 08:00")),
            Some("2024-01-15T08:00:00".to_string())
        );
    }

    #[test]
    fn allowed_values_apply_after_conversion() {
        let gender = field(FieldKind::Choice).with_allowed_values(["M", "F"]);
        assert!(validate(&gender, "F").is_valid());
        assert_eq!(
            validate(&gender, "X").error_message(),
            Some("Invalid choice. Must be one of: M, F")
        );

        let rating = field(FieldKind::Integer).with_allowed_values(["1", "2", "3"]);
        assert!(validate(&rating, "2.0").is_valid());
        assert!(!validate(&rating, "4").is_valid());
    }

    #[test]
    fn choice_without_values_is_text() {
        let free = field(FieldKind::Choice);
        assert_eq!(converted(&validate(&free, " any ")), Some("any".to_string()));
    }
}
