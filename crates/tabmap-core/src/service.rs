//! High-level import operations over a schema catalog.
//!
//! [`Importer`] ties the collaborators together and reports failures as
//! [`ImportError`]. It holds no per-import state; sessions are kept by a
//! [`SessionStore`](crate::SessionStore).

use std::path::Path;

use tabmap_ingest::{ReadOptions, SourceTable, read_table_with_options};
use tabmap_map::{MappingEngine, Suggestion};
use tabmap_model::{Mapping, MappingReport, SchemaDefinition, SchemaSummary};
use tabmap_schema::{SchemaCatalog, SchemaProvider};
use tabmap_validate::{ReportOptions, evaluate};

use crate::error::ImportError;
use crate::processor::{BatchOutcome, ProcessOptions, process_with_options};
use crate::session::ImportSession;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Import facade over a [`SchemaProvider`].
pub struct Importer<P> {
    catalog: SchemaCatalog<P>,
    read_options: ReadOptions,
}

impl<P: SchemaProvider> Importer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            catalog: SchemaCatalog::new(provider),
            read_options: ReadOptions::default(),
        }
    }

    #[must_use]
    pub fn with_read_options(mut self, read_options: ReadOptions) -> Self {
        self.read_options = read_options;
        self
    }

    pub fn catalog(&self) -> &SchemaCatalog<P> {
        &self.catalog
    }

    pub fn list_schemas(&self) -> Result<Vec<SchemaSummary>> {
        Ok(self.catalog.list_schemas()?)
    }

    pub fn schema(&self, name: &str) -> Result<SchemaDefinition> {
        Ok(self.catalog.get_schema(name)?)
    }

    pub fn read(&self, path: &Path) -> Result<SourceTable> {
        Ok(read_table_with_options(path, &self.read_options)?)
    }

    pub fn preview(&self, path: &Path, max_rows: usize) -> Result<SourceTable> {
        let options = ReadOptions {
            max_rows: Some(max_rows),
            ..self.read_options.clone()
        };
        Ok(read_table_with_options(path, &options)?)
    }

    /// Suggestions for every header of `table` against `schema`.
    pub fn suggest(&self, table: &SourceTable, schema: &SchemaDefinition) -> Vec<Suggestion> {
        MappingEngine::new(schema).suggest_with_confidence(&table.headers)
    }

    /// Point `session` at the schema called `name` and replace its mapping
    /// with fresh suggestions for the session's columns.
    pub fn retarget_session(
        &self,
        session: &mut ImportSession,
        name: &str,
    ) -> Result<SchemaDefinition> {
        let schema = self.schema(name)?;
        let suggestions = MappingEngine::new(&schema).suggest_with_confidence(&session.columns);
        session.select_schema(schema.name.clone());
        session.set_mapping(mapping_from_suggestions(&suggestions));
        Ok(schema)
    }

    pub fn check(
        &self,
        table: &SourceTable,
        schema: &SchemaDefinition,
        mapping: &Mapping,
        options: &ReportOptions,
    ) -> MappingReport {
        evaluate(schema, mapping, &table.rows, options)
    }

    pub fn process(
        &self,
        table: &SourceTable,
        schema: &SchemaDefinition,
        mapping: &Mapping,
        options: ProcessOptions,
    ) -> BatchOutcome {
        process_with_options(schema, mapping, &table.rows, options)
    }
}

/// Mapping from suggestions, for callers that only need targets.
pub fn mapping_from_suggestions(suggestions: &[Suggestion]) -> Mapping {
    Mapping::from_entries(
        suggestions
            .iter()
            .map(|s| (s.column.as_str(), s.target.as_deref())),
    )
}
