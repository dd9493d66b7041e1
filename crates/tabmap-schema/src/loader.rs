//! Schema loading from a `Schemas.csv` + `Fields.csv` pair.
//!
//! Fields.csv columns: `Field Order`, `Schema Name`, `Field Name`,
//! `Field Label`, `Kind`, `Required`, `Max Length`, `Allowed Values`
//! (`;`-separated) and `Related Schema`. Schemas.csv supplies the optional
//! label and description of each schema.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

use serde::Deserialize;
use tabmap_model::{FieldDefinition, FieldKind, SchemaDefinition};
use tracing::{debug, warn};

use crate::error::{Result, SchemaSourceError};

pub const SCHEMAS_FILE: &str = "Schemas.csv";
pub const FIELDS_FILE: &str = "Fields.csv";

// =============================================================================
// CSV Row Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SchemaCsvRow {
    #[serde(rename = "Schema Name")]
    schema_name: String,
    #[serde(rename = "Schema Label", default)]
    schema_label: String,
    #[serde(rename = "Description", default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct FieldCsvRow {
    #[serde(rename = "Field Order", default)]
    field_order: String,
    #[serde(rename = "Schema Name")]
    schema_name: String,
    #[serde(rename = "Field Name")]
    field_name: String,
    #[serde(rename = "Field Label", default)]
    field_label: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Required", default)]
    required: String,
    #[serde(rename = "Max Length", default)]
    max_length: String,
    #[serde(rename = "Allowed Values", default)]
    allowed_values: String,
    #[serde(rename = "Related Schema", default)]
    related_schema: String,
}

struct SchemaMeta {
    label: Option<String>,
    description: Option<String>,
}

struct OrderedField {
    order: Option<u32>,
    field: FieldDefinition,
}

// =============================================================================
// Loading Functions
// =============================================================================

/// Parse schema definitions from in-memory CSV content.
///
/// Schemas are returned sorted by name.
pub fn load_from_str(schemas_csv: &str, fields_csv: &str) -> Result<Vec<SchemaDefinition>> {
    let meta = read_schemas(Cursor::new(schemas_csv.as_bytes()), SCHEMAS_FILE)?;
    let fields = read_fields(Cursor::new(fields_csv.as_bytes()), FIELDS_FILE)?;
    build_schemas(meta, fields)
}

/// Load schema definitions from a directory holding `Schemas.csv` and
/// `Fields.csv`. `Schemas.csv` may be absent.
pub fn load_from_dir(dir: &Path) -> Result<Vec<SchemaDefinition>> {
    if !dir.is_dir() {
        return Err(SchemaSourceError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let fields_path = dir.join(FIELDS_FILE);
    if !fields_path.is_file() {
        return Err(SchemaSourceError::FileNotFound { path: fields_path });
    }
    let schemas_path = dir.join(SCHEMAS_FILE);
    let meta = if schemas_path.is_file() {
        read_schemas(open(&schemas_path)?, &schemas_path.display().to_string())?
    } else {
        BTreeMap::new()
    };
    let fields = read_fields(open(&fields_path)?, &fields_path.display().to_string())?;
    let schemas = build_schemas(meta, fields)?;
    debug!(
        dir = %dir.display(),
        schema_count = schemas.len(),
        "loaded schema definitions"
    );
    Ok(schemas)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|_| SchemaSourceError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn read_schemas<R: Read>(source: R, file: &str) -> Result<BTreeMap<String, SchemaMeta>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut schemas = BTreeMap::new();
    for result in reader.deserialize::<SchemaCsvRow>() {
        let row = result.map_err(|e| SchemaSourceError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        let name = row.schema_name.trim().to_string();
        if name.is_empty() {
            continue;
        }
        schemas.insert(
            name,
            SchemaMeta {
                label: non_empty(&row.schema_label),
                description: non_empty(&row.description),
            },
        );
    }
    Ok(schemas)
}

fn read_fields<R: Read>(source: R, file: &str) -> Result<BTreeMap<String, Vec<OrderedField>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut grouped: BTreeMap<String, Vec<OrderedField>> = BTreeMap::new();
    for result in reader.deserialize::<FieldCsvRow>() {
        let row = result.map_err(|e| SchemaSourceError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        let schema = row.schema_name.trim().to_string();
        let name = row.field_name.trim().to_string();
        if schema.is_empty() || name.is_empty() {
            continue;
        }

        let (kind, known) = FieldKind::parse_or_text(&row.kind);
        if !known {
            warn!(
                schema = %schema,
                field = %name,
                kind = %row.kind,
                "unknown field kind, treating as Text"
            );
        }

        let mut field = FieldDefinition::new(name, kind).required(parse_flag(&row.required, file)?);
        if let Some(label) = non_empty(&row.field_label) {
            field = field.with_label(label);
        }
        if let Some(raw) = non_empty(&row.max_length) {
            let max_length = raw
                .parse::<usize>()
                .map_err(|_| SchemaSourceError::InvalidValue {
                    column: "Max Length",
                    value: raw.clone(),
                    file: file.to_string(),
                })?;
            field = field.with_max_length(max_length);
        }
        let allowed: Vec<&str> = row
            .allowed_values
            .split(';')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        if !allowed.is_empty() {
            field = field.with_allowed_values(allowed);
        }
        if let Some(related) = non_empty(&row.related_schema) {
            field = field.with_related_schema(related);
        }

        let order = row.field_order.trim().parse::<u32>().ok();
        grouped
            .entry(schema)
            .or_default()
            .push(OrderedField { order, field });
    }
    Ok(grouped)
}

// =============================================================================
// Build Schemas
// =============================================================================

fn build_schemas(
    mut meta: BTreeMap<String, SchemaMeta>,
    mut fields: BTreeMap<String, Vec<OrderedField>>,
) -> Result<Vec<SchemaDefinition>> {
    let mut names: Vec<String> = meta.keys().chain(fields.keys()).cloned().collect();
    names.sort();
    names.dedup();

    let mut schemas = Vec::with_capacity(names.len());
    for name in names {
        let mut entries = fields.remove(&name).unwrap_or_default();
        // Stable sort keeps file order for equal or missing positions.
        entries.sort_by(|a, b| match (a.order, b.order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        let definitions = entries.into_iter().map(|entry| entry.field).collect();
        let mut schema = SchemaDefinition::new(name.clone(), definitions).map_err(|source| {
            SchemaSourceError::InvalidSchema {
                file: FIELDS_FILE.to_string(),
                source,
            }
        })?;
        if let Some(SchemaMeta { label, description }) = meta.remove(&name) {
            schema.label = label;
            schema.description = description;
        }
        schemas.push(schema);
    }
    Ok(schemas)
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_flag(raw: &str, file: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" | "n" | "no" | "false" | "0" => Ok(false),
        "y" | "yes" | "true" | "1" => Ok(true),
        _ => Err(SchemaSourceError::InvalidValue {
            column: "Required",
            value: raw.to_string(),
            file: file.to_string(),
        }),
    }
}

/// Return Some(value) if non-empty, None otherwise.
fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
