//! Schema providers: the sources a [`SchemaCatalog`](crate::SchemaCatalog)
//! reads definitions from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tabmap_model::SchemaDefinition;

use crate::embedded;
use crate::error::Result;
use crate::loader;

/// Environment variable selecting a schema directory instead of the
/// built-in schemas.
pub const SCHEMA_DIR_ENV_VAR: &str = "TABMAP_SCHEMA_DIR";

/// A source of schema definitions.
pub trait SchemaProvider: Send + Sync {
    /// Names of every schema this provider can load.
    fn schema_names(&self) -> Result<Vec<String>>;

    /// Load one schema by exact name; `Ok(None)` when the name is unknown.
    fn load_schema(&self, name: &str) -> Result<Option<SchemaDefinition>>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    fn schema_names(&self) -> Result<Vec<String>> {
        (**self).schema_names()
    }

    fn load_schema(&self, name: &str) -> Result<Option<SchemaDefinition>> {
        (**self).load_schema(name)
    }
}

/// Sample schemas compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProvider;

impl EmbeddedProvider {
    pub fn load_all(&self) -> Result<Vec<SchemaDefinition>> {
        loader::load_from_str(embedded::SCHEMAS_CSV, embedded::FIELDS_CSV)
    }
}

impl SchemaProvider for EmbeddedProvider {
    fn schema_names(&self) -> Result<Vec<String>> {
        Ok(self.load_all()?.into_iter().map(|s| s.name).collect())
    }

    fn load_schema(&self, name: &str) -> Result<Option<SchemaDefinition>> {
        Ok(self.load_all()?.into_iter().find(|s| s.name == name))
    }
}

/// Reads `Schemas.csv` and `Fields.csv` from a directory on every call.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_all(&self) -> Result<Vec<SchemaDefinition>> {
        loader::load_from_dir(&self.dir)
    }
}

impl SchemaProvider for DirectoryProvider {
    fn schema_names(&self) -> Result<Vec<String>> {
        Ok(self.load_all()?.into_iter().map(|s| s.name).collect())
    }

    fn load_schema(&self, name: &str) -> Result<Option<SchemaDefinition>> {
        Ok(self.load_all()?.into_iter().find(|s| s.name == name))
    }
}

/// Fixed set of schemas held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    schemas: BTreeMap<String, SchemaDefinition>,
}

impl InMemoryProvider {
    pub fn new(schemas: impl IntoIterator<Item = SchemaDefinition>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Adds or replaces a schema.
    pub fn insert(&mut self, schema: SchemaDefinition) {
        self.schemas.insert(schema.name.clone(), schema);
    }
}

impl SchemaProvider for InMemoryProvider {
    fn schema_names(&self) -> Result<Vec<String>> {
        Ok(self.schemas.keys().cloned().collect())
    }

    fn load_schema(&self, name: &str) -> Result<Option<SchemaDefinition>> {
        Ok(self.schemas.get(name).cloned())
    }
}

/// Provider selected by the environment.
///
/// Resolution order:
/// 1. explicit `dir` argument
/// 2. `TABMAP_SCHEMA_DIR` environment variable
/// 3. built-in schemas
pub fn resolve_provider(dir: Option<&Path>) -> Box<dyn SchemaProvider> {
    if let Some(dir) = dir {
        return Box::new(DirectoryProvider::new(dir));
    }
    match std::env::var(SCHEMA_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => Box::new(DirectoryProvider::new(dir)),
        _ => Box::new(EmbeddedProvider),
    }
}
