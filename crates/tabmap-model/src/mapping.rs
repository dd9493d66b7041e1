use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One source column and the schema field it feeds, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source_column: String,
    #[serde(default)]
    pub target_field: Option<String>,
}

/// Source column to target field assignments, in column order.
///
/// A mapping is a value: edits produce a new mapping via [`Mapping::with_target`].
/// Serialized as a JSON object `{"column": "field" | null}`; empty or blank
/// targets read back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, Option<String>>", into = "IndexMap<String, Option<String>>")]
pub struct Mapping {
    entries: IndexMap<String, Option<String>>,
}

fn clean_target(target: Option<String>) -> Option<String> {
    target.and_then(|t| {
        let trimmed = t.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == t.len() {
            Some(t)
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl From<IndexMap<String, Option<String>>> for Mapping {
    fn from(entries: IndexMap<String, Option<String>>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(column, target)| (column, clean_target(target)))
                .collect(),
        }
    }
}

impl From<Mapping> for IndexMap<String, Option<String>> {
    fn from(mapping: Mapping) -> Self {
        mapping.entries
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from `(column, target)` pairs. A repeated column keeps
    /// its first position and its last target.
    pub fn from_entries<I, C, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, Option<T>)>,
        C: Into<String>,
        T: Into<String>,
    {
        let mut map = IndexMap::new();
        for (column, target) in entries {
            map.insert(column.into(), clean_target(target.map(Into::into)));
        }
        Self { entries: map }
    }

    /// Returns a copy with `column` pointing at `target`.
    ///
    /// Unknown columns are appended at the end.
    #[must_use]
    pub fn with_target(&self, column: &str, target: Option<&str>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(column.to_string(), clean_target(target.map(str::to_string)));
        Self { entries }
    }

    /// Target field for `column`; `None` when the column is unmapped or unknown.
    pub fn target_for(&self, column: &str) -> Option<&str> {
        self.entries.get(column).and_then(|t| t.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(column, target)| (column.as_str(), target.as_deref()))
    }

    /// Entries that have a target.
    pub fn mapped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(column, target)| target.as_deref().map(|t| (column.as_str(), t)))
    }

    pub fn unmapped_columns(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, target)| target.is_none())
            .map(|(column, _)| column.as_str())
    }

    /// True if any entry targets `field`.
    pub fn targets_field(&self, field: &str) -> bool {
        self.entries
            .values()
            .any(|target| target.as_deref() == Some(field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.values().filter(|t| t.is_some()).count()
    }

    pub fn to_entries(&self) -> Vec<MappingEntry> {
        self.entries
            .iter()
            .map(|(column, target)| MappingEntry {
                source_column: column.clone(),
                target_field: target.clone(),
            })
            .collect()
    }
}

impl FromIterator<MappingEntry> for Mapping {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self::from_entries(
            iter.into_iter()
                .map(|entry| (entry.source_column, entry.target_field)),
        )
    }
}
