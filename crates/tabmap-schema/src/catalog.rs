use tabmap_model::{SchemaDefinition, SchemaSummary};

use crate::error::CatalogError;
use crate::provider::SchemaProvider;

/// Read-through schema lookup over a [`SchemaProvider`].
#[derive(Debug, Clone)]
pub struct SchemaCatalog<P> {
    provider: P,
}

impl<P: SchemaProvider> SchemaCatalog<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Summaries of every schema the provider knows, in provider order.
    pub fn list_schemas(&self) -> Result<Vec<SchemaSummary>, CatalogError> {
        let mut summaries = Vec::new();
        for name in self.provider.schema_names()? {
            if let Some(schema) = self.provider.load_schema(&name)? {
                summaries.push(schema.summary());
            }
        }
        Ok(summaries)
    }

    /// Looks a schema up by exact name, then case-insensitively.
    pub fn get_schema(&self, name: &str) -> Result<SchemaDefinition, CatalogError> {
        let wanted = name.trim();
        if let Some(schema) = self.provider.load_schema(wanted)? {
            return Ok(schema);
        }
        let candidate = self
            .provider
            .schema_names()?
            .into_iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted));
        if let Some(candidate) = candidate
            && let Some(schema) = self.provider.load_schema(&candidate)?
        {
            return Ok(schema);
        }
        Err(CatalogError::NotFound {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tabmap_model::{FieldDefinition, FieldKind};

    use super::*;
    use crate::provider::InMemoryProvider;

    fn catalog() -> SchemaCatalog<InMemoryProvider> {
        let customer = SchemaDefinition::new(
            "Customer",
            vec![
                FieldDefinition::new("email", FieldKind::Email).required(true),
                FieldDefinition::new("phone", FieldKind::Text),
            ],
        )
        .expect("schema");
        SchemaCatalog::new(InMemoryProvider::new([customer]))
    }

    #[test]
    fn finds_schema_case_insensitively() {
        let catalog = catalog();
        assert_eq!(catalog.get_schema("Customer").expect("exact").name, "Customer");
        assert_eq!(catalog.get_schema("customer").expect("folded").name, "Customer");
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let err = catalog().get_schema("Invoice").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { name } if name == "Invoice"));
    }

    #[test]
    fn lists_summaries() {
        let summaries = catalog().list_schemas().expect("list");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].field_count, 2);
        assert_eq!(summaries[0].required_count, 1);
    }
}
