use std::path::PathBuf;

use tabmap_core::{BatchOutcome, ExportPaths};

#[derive(Debug)]
pub struct ProcessResult {
    pub file: PathBuf,
    pub schema: String,
    pub outcome: BatchOutcome,
    /// `None` for dry runs.
    pub outputs: Option<ExportPaths>,
}

impl ProcessResult {
    pub fn has_rejections(&self) -> bool {
        self.outcome.has_rejections()
    }
}
