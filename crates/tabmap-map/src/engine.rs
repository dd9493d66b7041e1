//! Mapping engine implementation.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::Serialize;
use tabmap_model::{Mapping, SchemaDefinition};

use crate::utils::{column_tokens, length_ratio, normalize_name};

/// Containment matches must be strictly above this length ratio.
const PARTIAL_MATCH_MIN_RATIO: f64 = 0.6;

const CONFIDENCE_EXACT: u8 = 100;
const CONFIDENCE_CONTAINS: u8 = 80;
const CONFIDENCE_TOKEN: u8 = 60;
const CONFIDENCE_WEAK: u8 = 40;

/// Confidence level categories for display.
///
/// - `High`: exact normalized match
/// - `Medium`: one name contains the other
/// - `Low`: token overlap or nothing better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= CONFIDENCE_EXACT {
            Self::High
        } else if score >= CONFIDENCE_CONTAINS {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Suggested target for one source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub column: String,
    pub target: Option<String>,
    /// 0-100 display score; `None` when there is no target.
    pub confidence: Option<u8>,
}

impl Suggestion {
    pub fn level(&self) -> Option<ConfidenceLevel> {
        self.confidence.map(ConfidenceLevel::from_score)
    }
}

/// Jaro-Winkler similarity of a column to one schema field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRank {
    pub field: String,
    pub score: f64,
}

/// Engine for suggesting source column to schema field mappings.
///
/// Each column is matched independently against the schema's fields in
/// declaration order by normalized name. Two columns may receive the same
/// field; resolving that is left to the user.
///
/// # Example
///
/// ```ignore
/// use tabmap_map::MappingEngine;
///
/// let engine = MappingEngine::new(&schema);
/// let mapping = engine.suggest(&["E-mail".to_string(), "Phone#".to_string()]);
/// ```
pub struct MappingEngine<'a> {
    schema: &'a SchemaDefinition,
    /// `(field name, normalized name)` in declaration order.
    fields: Vec<(&'a str, String)>,
}

impl<'a> MappingEngine<'a> {
    pub fn new(schema: &'a SchemaDefinition) -> Self {
        let fields = schema
            .field_names()
            .map(|name| (name, normalize_name(name)))
            .collect();
        Self { schema, fields }
    }

    pub fn schema(&self) -> &SchemaDefinition {
        self.schema
    }

    /// Suggests a target for every column, keeping column order.
    pub fn suggest<S: AsRef<str>>(&self, columns: &[S]) -> Mapping {
        Mapping::from_entries(
            columns
                .iter()
                .map(|column| (column.as_ref(), self.best_field(column.as_ref()))),
        )
    }

    /// Like [`Self::suggest`], with a display confidence per column.
    pub fn suggest_with_confidence<S: AsRef<str>>(&self, columns: &[S]) -> Vec<Suggestion> {
        columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                let target = self.best_field(column);
                let confidence = target.map(|field| confidence(column, field));
                Suggestion {
                    column: column.to_string(),
                    target: target.map(str::to_string),
                    confidence,
                }
            })
            .collect()
    }

    /// Best field for one column.
    ///
    /// An exact normalized match wins immediately. Otherwise the field with
    /// the highest `min/max` length ratio among those where one normalized
    /// name contains the other is chosen, if that ratio exceeds 0.6. Ties
    /// keep the earlier field.
    pub fn best_field(&self, column: &str) -> Option<&'a str> {
        let normalized = normalize_name(column);
        let mut best: Option<&'a str> = None;
        let mut best_score = 0.0;

        for (name, field_normalized) in &self.fields {
            if normalized == *field_normalized {
                return Some(name);
            }
            if field_normalized.contains(normalized.as_str())
                || normalized.contains(field_normalized.as_str())
            {
                let score = length_ratio(&normalized, field_normalized);
                if score > best_score && score > PARTIAL_MATCH_MIN_RATIO {
                    best = Some(name);
                    best_score = score;
                }
            }
        }
        best
    }

    /// Fields ranked by Jaro-Winkler similarity of normalized names,
    /// best first. Ties keep declaration order.
    pub fn rank_fields(&self, column: &str, limit: usize) -> Vec<FieldRank> {
        let normalized = normalize_name(column);
        let mut ranked: Vec<FieldRank> = self
            .fields
            .iter()
            .map(|(name, field_normalized)| FieldRank {
                field: (*name).to_string(),
                score: jaro_similarity(normalized.chars(), field_normalized.chars()),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

/// Suggests a mapping for `columns` against `schema`.
pub fn suggest<S: AsRef<str>>(columns: &[S], schema: &SchemaDefinition) -> Mapping {
    MappingEngine::new(schema).suggest(columns)
}

/// Display confidence (0-100) of mapping `column` to `field`.
///
/// 100 for an exact normalized match, 80 when one normalized name contains
/// the other, 60 when a whitespace token of the lowercased column appears in
/// the normalized field name, otherwise 40.
pub fn confidence(column: &str, field: &str) -> u8 {
    let column_normalized = normalize_name(column);
    let field_normalized = normalize_name(field);
    if column_normalized == field_normalized {
        CONFIDENCE_EXACT
    } else if field_normalized.contains(column_normalized.as_str())
        || column_normalized.contains(field_normalized.as_str())
    {
        CONFIDENCE_CONTAINS
    } else if column_tokens(column).any(|token| field_normalized.contains(token.as_str())) {
        CONFIDENCE_TOKEN
    } else {
        CONFIDENCE_WEAK
    }
}
