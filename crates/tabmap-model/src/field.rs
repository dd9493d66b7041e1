use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Value kind of a schema field.
///
/// The set is closed: providers that report a kind outside it get
/// [`FieldKind::Text`] through [`FieldKind::parse_or_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Email,
    Choice,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::Integer,
        FieldKind::Decimal,
        FieldKind::Boolean,
        FieldKind::Date,
        FieldKind::DateTime,
        FieldKind::Email,
        FieldKind::Choice,
    ];

    /// Returns the canonical tag as it appears in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Integer => "Integer",
            FieldKind::Decimal => "Decimal",
            FieldKind::Boolean => "Boolean",
            FieldKind::Date => "Date",
            FieldKind::DateTime => "DateTime",
            FieldKind::Email => "Email",
            FieldKind::Choice => "Choice",
        }
    }

    /// True for kinds whose converted value is a plain string.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Email | FieldKind::Choice)
    }

    /// Parse a kind tag, falling back to `Text` for unrecognized tags.
    ///
    /// The flag is `false` when the fallback was applied, so the caller can
    /// warn about it.
    pub fn parse_or_text(tag: &str) -> (Self, bool) {
        match tag.parse() {
            Ok(kind) => (kind, true),
            Err(_) => (FieldKind::Text, false),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    /// Parse a kind tag (case-insensitive).
    /// Accepts the canonical names plus common database and ORM spellings
    /// such as `varchar`, `bigint`, `float` or `CharField`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        let normalized = match compact.strip_suffix("field") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => compact.as_str(),
        };
        match normalized {
            "text" | "string" | "str" | "char" | "varchar" | "url" | "slug" => Ok(FieldKind::Text),
            "integer" | "int" | "bigint" | "biginteger" | "smallint" | "smallinteger"
            | "positiveinteger" | "long" => Ok(FieldKind::Integer),
            "decimal" | "float" | "double" | "number" | "numeric" | "real" => {
                Ok(FieldKind::Decimal)
            }
            "boolean" | "bool" => Ok(FieldKind::Boolean),
            "date" => Ok(FieldKind::Date),
            "datetime" | "timestamp" => Ok(FieldKind::DateTime),
            "email" => Ok(FieldKind::Email),
            "choice" | "enum" | "select" => Ok(FieldKind::Choice),
            _ => Err(format!("Unknown field kind: {s}")),
        }
    }
}

/// One named, typed slot in a target schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub allowed_values: Option<IndexSet<String>>,
    #[serde(default)]
    pub related_schema: Option<String>,
}

impl FieldDefinition {
    /// Creates an optional field with no constraints.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
            required: false,
            max_length: None,
            allowed_values: None,
            related_schema: None,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Restricts the field to an ordered set of allowed values.
    #[must_use]
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_related_schema(mut self, schema: impl Into<String>) -> Self {
        self.related_schema = Some(schema.into());
        self
    }

    /// True when the field carries a non-empty set of allowed values.
    pub fn has_choices(&self) -> bool {
        self.allowed_values
            .as_ref()
            .is_some_and(|values| !values.is_empty())
    }

    /// Returns true if `value` is acceptable under the allowed-values rule.
    pub fn allows(&self, value: &str) -> bool {
        match &self.allowed_values {
            Some(values) if !values.is_empty() => values.contains(value),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_alias_tags() {
        assert_eq!("Integer".parse::<FieldKind>(), Ok(FieldKind::Integer));
        assert_eq!("bigint".parse::<FieldKind>(), Ok(FieldKind::Integer));
        assert_eq!("CharField".parse::<FieldKind>(), Ok(FieldKind::Text));
        assert_eq!("DateTimeField".parse::<FieldKind>(), Ok(FieldKind::DateTime));
        assert_eq!("date_time".parse::<FieldKind>(), Ok(FieldKind::DateTime));
        assert_eq!(" email ".parse::<FieldKind>(), Ok(FieldKind::Email));
        assert_eq!("float".parse::<FieldKind>(), Ok(FieldKind::Decimal));
    }

    #[test]
    fn unknown_tag_falls_back_to_text() {
        assert_eq!(FieldKind::parse_or_text("JSONField"), (FieldKind::Text, false));
        assert_eq!(FieldKind::parse_or_text("Boolean"), (FieldKind::Boolean, true));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.to_string().parse::<FieldKind>(), Ok(kind));
        }
    }

    #[test]
    fn allows_respects_choice_set() {
        let field = FieldDefinition::new("gender", FieldKind::Choice)
            .with_allowed_values(["Male", "Female", "Other"]);
        assert!(field.has_choices());
        assert!(field.allows("Female"));
        assert!(!field.allows("female"));

        let free = FieldDefinition::new("name", FieldKind::Text);
        assert!(!free.has_choices());
        assert!(free.allows("anything"));
    }
}
