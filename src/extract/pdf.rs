use std::path::Path;

use crate::error::Result;
use crate::extract::{extract_err, Extractor};
use crate::progress::ProgressTx;

/// Page-by-page PDF text extractor with per-page progress.
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| extract_err(path, format!("PDF load failed: {e}")))?;

        let pages = doc.get_pages();
        let total = pages.len().max(1);
        let mut texts = Vec::with_capacity(pages.len());

        for (i, page_no) in pages.keys().enumerate() {
            // A page whose content stream cannot be decoded contributes an
            // empty string rather than failing the whole document.
            texts.push(doc.extract_text(&[*page_no]).unwrap_or_default());
            progress.report((((i + 1) * 100) / total) as u8);
        }

        Ok(texts.join("\n"))
    }
}
