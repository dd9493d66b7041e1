use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Supported source formats. Serialized and displayed as `csv` or `excel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// Comma-separated text.
    #[serde(rename = "csv")]
    Delimited,
    /// Excel or OpenDocument workbook; only the first sheet is read.
    #[serde(rename = "excel")]
    Spreadsheet,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Delimited => "csv",
            FileType::Spreadsheet => "excel",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file by its extension (case-insensitive).
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(FileType::Delimited),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(FileType::Spreadsheet),
        _ => Err(IngestError::UnsupportedFileType {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension() {
        assert_eq!(
            detect_file_type(Path::new("people.CSV")).unwrap(),
            FileType::Delimited
        );
        assert_eq!(
            detect_file_type(Path::new("book.xlsx")).unwrap(),
            FileType::Spreadsheet
        );
        assert_eq!(
            detect_file_type(Path::new("legacy.xls")).unwrap(),
            FileType::Spreadsheet
        );
    }

    #[test]
    fn display_matches_serialized_name() {
        for file_type in [FileType::Delimited, FileType::Spreadsheet] {
            let json = serde_json::to_string(&file_type).unwrap();
            assert_eq!(json, format!("\"{file_type}\""));
            let back: FileType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, file_type);
        }
        assert_eq!(FileType::Spreadsheet.to_string(), "excel");
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["notes.txt", "data.json", "no_extension"] {
            assert!(matches!(
                detect_file_type(Path::new(name)),
                Err(IngestError::UnsupportedFileType { .. })
            ));
        }
    }
}
