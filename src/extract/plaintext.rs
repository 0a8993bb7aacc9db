use std::path::Path;

use crate::error::Result;
use crate::extract::Extractor;
use crate::progress::ProgressTx;

/// Plain-text extractor: permissive decode, invalid bytes replaced.
pub struct PlaintextExtractor;

impl Default for PlaintextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaintextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PlaintextExtractor {
    fn format(&self) -> &'static str {
        "txt"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let bytes = std::fs::read(path)?;
        progress.done();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
