use std::path::Path;

use crate::error::Result;
use crate::extract::{extract_err, ooxml, Extractor};
use crate::progress::ProgressTx;

/// Word document extractor: paragraph texts joined by newlines.
pub struct DocxExtractor;

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for DocxExtractor {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let xml = ooxml::read_entry(path, "word/document.xml")?;
        let paragraphs = ooxml::run_paragraphs(&xml)
            .map_err(|e| extract_err(path, format!("malformed document.xml: {e}")))?;
        progress.done();
        Ok(paragraphs.join("\n"))
    }
}
