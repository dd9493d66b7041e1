//! Reading a source file into headers and raw rows.

use std::path::Path;

use serde::Serialize;
use tabmap_model::RawRow;
use tracing::{debug, warn};

use crate::delimited::read_delimited;
use crate::error::{IngestError, Result};
use crate::file_type::{FileType, detect_file_type};
use crate::header::dedupe_headers;
use crate::spreadsheet::read_spreadsheet;

/// Maximum file size for loading (500 MB default).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Column count above which a warning is logged.
const WIDE_TABLE_COLUMNS: usize = 500;

/// Header row and records before header normalization.
#[derive(Debug)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
    /// Stop after this many non-blank data rows.
    pub max_rows: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_rows: None,
        }
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceTable {
    /// Unique, trimmed column names in file order.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl SourceTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Read every data row of a CSV or spreadsheet file.
pub fn read_table(path: &Path) -> Result<SourceTable> {
    read_table_with_options(path, &ReadOptions::default())
}

/// Read at most `max_rows` data rows, for previews.
pub fn read_preview(path: &Path, max_rows: usize) -> Result<SourceTable> {
    read_table_with_options(
        path,
        &ReadOptions {
            max_rows: Some(max_rows),
            ..ReadOptions::default()
        },
    )
}

pub fn read_table_with_options(path: &Path, options: &ReadOptions) -> Result<SourceTable> {
    let file_type = detect_file_type(path)?;
    check_file_size(path, options.max_file_size)?;

    let raw = match file_type {
        FileType::Delimited => read_delimited(path, options.max_rows)?,
        FileType::Spreadsheet => read_spreadsheet(path, options.max_rows)?,
    };
    let table = build_table(raw);

    if table.column_count() > WIDE_TABLE_COLUMNS {
        warn!(
            path = %path.display(),
            columns = table.column_count(),
            "file is unusually wide; mapping may be slow"
        );
    }
    debug!(
        path = %path.display(),
        file_type = %file_type,
        columns = table.column_count(),
        rows = table.row_count(),
        "read source table"
    );
    Ok(table)
}

fn build_table(raw: RawTable) -> SourceTable {
    let headers = dedupe_headers(&raw.headers);
    let rows = raw
        .rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), cells.next().unwrap_or_default()))
                .collect::<RawRow>()
        })
        .collect();
    SourceTable { headers, rows }
}
