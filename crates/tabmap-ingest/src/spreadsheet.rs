//! Workbook reading via calamine. Only the first worksheet is used.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::Timelike;

use crate::error::{IngestError, Result};
use crate::header::is_blank_record;
use crate::table::RawTable;

pub(crate) fn read_spreadsheet(path: &Path, max_rows: Option<usize>) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => {
            return Err(IngestError::NoHeaderDetected {
                path: path.to_path_buf(),
            });
        }
    };
    if is_blank_record(&headers) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for row in sheet_rows {
        if max_rows.is_some_and(|max| rows.len() >= max) {
            break;
        }
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if is_blank_record(&cells) {
            continue;
        }
        rows.push(cells);
    }
    Ok(RawTable { headers, rows })
}

/// Text form of a cell as a user would type it.
///
/// Whole-number floats lose their fraction (`3.0` reads as `3`); dates
/// without a time part render as `YYYY-MM-DD`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time().num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 => {
                dt.format("%Y-%m-%d").to_string()
            }
            Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
