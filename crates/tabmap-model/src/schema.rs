use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldDefinition;

/// A named record shape with an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    fields: IndexMap<String, FieldDefinition>,
}

/// Listing entry for a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub field_count: usize,
    pub required_count: usize,
}

impl SchemaDefinition {
    /// Builds a schema, keeping fields in declaration order.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptySchemaName);
        }
        let mut map = IndexMap::with_capacity(fields.len());
        for field in fields {
            if field.name.trim().is_empty() {
                return Err(ModelError::EmptyFieldName {
                    schema: name.clone(),
                });
            }
            if map.contains_key(&field.name) {
                return Err(ModelError::DuplicateField {
                    schema: name.clone(),
                    field: field.name,
                });
            }
            map.insert(field.name.clone(), field);
        }
        Ok(Self {
            name,
            label: None,
            description: None,
            fields: map,
        })
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values().filter(|field| field.required)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values().filter(|field| !field.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            name: self.name.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            field_count: self.fields.len(),
            required_count: self.required_fields().count(),
        }
    }
}
