//! JSON export of batch outcomes.
//!
//! Processed records become an array of flat objects keyed by field name.
//! Rejected records become `{row, data, errors}` objects where `row` is the
//! one-based data row number and `data` is the raw row as read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tabmap_model::{FieldError, ProcessedRecord, RawRow, RejectedRecord};
use tracing::debug;

use crate::error::ExportError;
use crate::processor::BatchOutcome;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Serialize)]
struct RejectedRow<'a> {
    row: usize,
    data: &'a RawRow,
    errors: &'a [FieldError],
}

impl<'a> From<&'a RejectedRecord> for RejectedRow<'a> {
    fn from(record: &'a RejectedRecord) -> Self {
        Self {
            row: record.row_number(),
            data: &record.raw_row,
            errors: &record.errors,
        }
    }
}

/// Files produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub processed: PathBuf,
    /// Only written when at least one row was rejected.
    pub errors: Option<PathBuf>,
}

pub fn processed_json(records: &[ProcessedRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|source| ExportError::Serialize {
        what: "processed records",
        source,
    })
}

pub fn rejected_json(records: &[RejectedRecord]) -> Result<String> {
    let rows: Vec<RejectedRow<'_>> = records.iter().map(RejectedRow::from).collect();
    serde_json::to_string_pretty(&rows).map_err(|source| ExportError::Serialize {
        what: "rejected records",
        source,
    })
}

/// Write `{stem}_processed.json` and, when needed, `{stem}_errors.json` into
/// `dir`, creating it if missing. A clean run removes any errors file left by
/// an earlier one.
pub fn write_outputs(dir: &Path, stem: &str, outcome: &BatchOutcome) -> Result<ExportPaths> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let processed = dir.join(format!("{stem}_processed.json"));
    write_file(&processed, &processed_json(&outcome.processed)?)?;

    let errors_path = dir.join(format!("{stem}_errors.json"));
    let errors = if outcome.has_rejections() {
        write_file(&errors_path, &rejected_json(&outcome.rejected)?)?;
        Some(errors_path)
    } else {
        remove_stale(&errors_path)?;
        None
    };

    debug!(
        processed = outcome.valid_count(),
        rejected = outcome.invalid_count(),
        dir = %dir.display(),
        "wrote export files"
    );
    Ok(ExportPaths { processed, errors })
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale errors file");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ExportError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
