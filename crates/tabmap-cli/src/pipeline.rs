//! Import pipeline with explicit stages.
//!
//! 1. **Schema**: resolve the target schema from the catalog
//! 2. **Ingest**: read the source file into a table
//! 3. **Map**: load a mapping (file or session) or suggest one
//! 4. **Process**: validate every row
//! 5. **Output**: write processed and rejected records as JSON
//!
//! Each stage logs its counts and duration under an `info_span!`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tabmap_core::{
    BatchOutcome, ExportPaths, FileSessionStore, ImportSession, Importer, ProcessOptions,
    SessionStore, mapping_from_suggestions, write_outputs,
};
use tabmap_ingest::{SourceTable, detect_file_type};
use tabmap_model::{Mapping, SchemaDefinition};
use tabmap_schema::{SchemaProvider, resolve_provider};
use tracing::{debug, info, info_span, trace, warn};
use uuid::Uuid;

use crate::logging::redact_value;

pub type CliImporter = Importer<Box<dyn SchemaProvider>>;

/// Importer over `--schema-dir`, `$TABMAP_SCHEMA_DIR` or the built-in schemas.
pub fn build_importer(schema_dir: Option<&Path>) -> CliImporter {
    Importer::new(resolve_provider(schema_dir))
}

// ============================================================================
// Stage 1: Schema
// ============================================================================

pub fn load_schema(importer: &CliImporter, name: &str) -> Result<SchemaDefinition> {
    let span = info_span!("schema", schema = %name);
    let _guard = span.enter();
    let schema = importer
        .schema(name)
        .with_context(|| format!("load schema {name}"))?;
    debug!(
        schema = %schema.name,
        fields = schema.len(),
        required = schema.required_fields().count(),
        "schema loaded"
    );
    Ok(schema)
}

// ============================================================================
// Stage 2: Ingest
// ============================================================================

pub fn ingest(importer: &CliImporter, path: &Path) -> Result<SourceTable> {
    let span = info_span!("ingest", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let table = importer
        .read(path)
        .with_context(|| format!("read {}", path.display()))?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 3: Map
// ============================================================================

/// Where the mapping for a run comes from.
#[derive(Debug, Clone)]
pub enum MappingSource {
    /// Mapping JSON file.
    File(PathBuf),
    /// Mapping saved in a session.
    Session { dir: PathBuf, id: Uuid },
    /// Fresh suggestions for the table headers.
    Suggested,
}

pub fn resolve_mapping(
    importer: &CliImporter,
    source: &MappingSource,
    table: &SourceTable,
    schema: &SchemaDefinition,
) -> Result<Mapping> {
    let span = info_span!("map", schema = %schema.name);
    let _guard = span.enter();
    let mapping = match source {
        MappingSource::File(path) => read_mapping_file(path)?,
        MappingSource::Session { dir, id } => session_mapping(dir, *id, schema)?,
        MappingSource::Suggested => mapping_from_suggestions(&importer.suggest(table, schema)),
    };

    for (column, target) in mapping.mapped() {
        if !schema.contains_field(target) {
            warn!(column = %column, target = %target, "mapping target is not a schema field");
        }
    }
    for column in mapping.iter().map(|(column, _)| column) {
        if !table.headers.iter().any(|h| h == column) {
            warn!(column = %column, "mapped column is not in the file");
        }
    }
    info!(
        columns = mapping.len(),
        mapped = mapping.mapped_count(),
        "mapping resolved"
    );
    Ok(mapping)
}

pub fn read_mapping_file(path: &Path) -> Result<Mapping> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read mapping {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse mapping {}", path.display()))
}

pub fn write_mapping_file(path: &Path, mapping: &Mapping) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(mapping).context("serialize mapping")?;
    fs::write(path, json).with_context(|| format!("write mapping {}", path.display()))
}

fn session_mapping(dir: &Path, id: Uuid, schema: &SchemaDefinition) -> Result<Mapping> {
    let store = FileSessionStore::new(dir).context("open session store")?;
    let session = store.get(id).context("load session")?;
    match session.target_schema.as_deref() {
        Some(target) if target.eq_ignore_ascii_case(&schema.name) => Ok(session.mapping),
        Some(target) => bail!(
            "session {id} targets schema {target}, not {}",
            schema.name
        ),
        None => bail!("session {id} has no schema selected"),
    }
}

// ============================================================================
// Stage 4: Process
// ============================================================================

pub fn process(
    importer: &CliImporter,
    table: &SourceTable,
    schema: &SchemaDefinition,
    mapping: &Mapping,
    parallel: bool,
) -> BatchOutcome {
    let span = info_span!("process", schema = %schema.name, parallel);
    let _guard = span.enter();
    let start = Instant::now();
    let outcome = importer.process(table, schema, mapping, ProcessOptions { parallel });
    for rejected in &outcome.rejected {
        for error in &rejected.errors {
            trace!(
                row = rejected.row_number(),
                field = %error.field,
                value = %redact_value(&error.value),
                error = %error.error,
                "row rejected"
            );
        }
    }
    info!(
        total = outcome.total_rows(),
        valid = outcome.valid_count(),
        invalid = outcome.invalid_count(),
        duration_ms = start.elapsed().as_millis(),
        "process complete"
    );
    outcome
}

// ============================================================================
// Stage 5: Output
// ============================================================================

/// `<file directory>/output` unless overridden.
pub fn default_output_dir(file: &Path) -> PathBuf {
    file.parent()
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

pub fn output_stem(file: &Path) -> String {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("import")
        .to_string()
}

pub fn output(dir: &Path, stem: &str, outcome: &BatchOutcome) -> Result<ExportPaths> {
    let span = info_span!("output", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let paths = write_outputs(dir, stem, outcome)
        .with_context(|| format!("write outputs to {}", dir.display()))?;
    info!(
        processed = %paths.processed.display(),
        errors = paths.errors.is_some(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(paths)
}

// ============================================================================
// Sessions
// ============================================================================

/// New session for `file` with its headers recorded. With `schema`, the
/// session targets it and starts from suggestions.
pub fn start_session(
    importer: &CliImporter,
    file: &Path,
    schema: Option<&str>,
) -> Result<ImportSession> {
    let file_type = detect_file_type(file)?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let headers = importer
        .preview(file, 0)
        .with_context(|| format!("read {}", file.display()))?
        .headers;
    let mut session = ImportSession::new(filename, file_type).with_columns(headers);
    if let Some(name) = schema {
        importer
            .retarget_session(&mut session, name)
            .with_context(|| format!("load schema {name}"))?;
    }
    debug!(id = %session.id, columns = session.columns.len(), "session started");
    Ok(session)
}

/// Switch a stored session to schema `name`, replacing its mapping with
/// suggestions for the recorded columns.
pub fn select_session_schema(
    importer: &CliImporter,
    store: &impl SessionStore,
    id: Uuid,
    name: &str,
) -> Result<ImportSession> {
    let mut session = store.get(id).context("load session")?;
    let previous = session.target_schema.clone();
    importer
        .retarget_session(&mut session, name)
        .with_context(|| format!("load schema {name}"))?;
    if session.columns.is_empty() {
        warn!(id = %id, "session has no recorded columns; mapping left empty");
    }
    store.save(&session).context("save session")?;
    info!(
        id = %id,
        from = previous.as_deref().unwrap_or("-"),
        to = session.target_schema.as_deref().unwrap_or("-"),
        mapped = session.mapping.mapped_count(),
        "session schema changed"
    );
    Ok(session)
}
