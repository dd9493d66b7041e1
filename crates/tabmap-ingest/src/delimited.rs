//! CSV reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::header::is_blank_record;
use crate::table::RawTable;

/// Reject UTF-16 input, which the CSV reader cannot decode.
///
/// A UTF-8 byte-order mark is accepted and stripped from the first header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::from_io(path, e))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Reads a comma-separated file. The first record is the header row; ragged
/// rows are accepted.
pub(crate) fn read_delimited(path: &Path, max_rows: Option<usize>) -> Result<RawTable> {
    validate_encoding(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| csv_error(path, &e))?
            .iter()
            .map(str::to_string)
            .collect(),
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
    for record in records {
        if max_rows.is_some_and(|max| rows.len() >= max) {
            break;
        }
        let record = record.map_err(|e| csv_error(path, &e))?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if is_blank_record(&cells) {
            continue;
        }
        rows.push(cells);
    }
    Ok(RawTable { headers, rows })
}

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    if let csv::ErrorKind::Io(io) = err.kind()
        && io.kind() == std::io::ErrorKind::NotFound
    {
        return IngestError::FileNotFound {
            path: path.to_path_buf(),
        };
    }
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0]);
        assert!(matches!(
            validate_encoding(file.path()),
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let file = create_temp_csv(b"");
        assert!(matches!(
            read_delimited(file.path(), None),
            Err(IngestError::NoHeaderDetected { .. })
        ));
    }

    #[test]
    fn test_skips_blank_rows_and_honours_limit() {
        let file = create_temp_csv(b"A,B\n1,2\n,\n3,4\n5,6\n");
        let table = read_delimited(file.path(), Some(2)).unwrap();
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }
}
