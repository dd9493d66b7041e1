//! Tabular file ingestion.
//!
//! Reads CSV files and the first sheet of Excel/OpenDocument workbooks into
//! a [`SourceTable`]: unique trimmed headers plus one [`RawRow`] per
//! non-blank data row, with missing cells as empty strings.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabmap_ingest::{detect_file_type, read_preview};
//!
//! let path = Path::new("customers.xlsx");
//! let file_type = detect_file_type(path)?;
//! let preview = read_preview(path, 10)?;
//! println!("{file_type}: {:?}", preview.headers);
//! ```
//!
//! [`RawRow`]: tabmap_model::RawRow

mod delimited;
mod error;
mod file_type;
mod header;
mod spreadsheet;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Types ===
pub use file_type::{FileType, detect_file_type};

// === Reading ===
pub use delimited::validate_encoding;
pub use header::{dedupe_headers, normalize_header};
pub use spreadsheet::cell_to_string;
pub use table::{
    MAX_FILE_SIZE, ReadOptions, SourceTable, check_file_size, read_preview, read_table,
    read_table_with_options,
};
