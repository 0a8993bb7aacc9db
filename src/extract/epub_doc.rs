use std::path::Path;

use epub::doc::EpubDoc;

use crate::error::Result;
use crate::extract::html::strip_tags;
use crate::extract::{extract_err, Extractor};
use crate::progress::ProgressTx;

/// EPUB extractor: every spine document item tag-stripped, with per-item
/// progress.
pub struct EpubExtractor;

impl Default for EpubExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EpubExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for EpubExtractor {
    fn format(&self) -> &'static str {
        "epub"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let mut doc =
            EpubDoc::new(path).map_err(|e| extract_err(path, format!("EPUB open failed: {e}")))?;

        let count = doc.get_num_pages();
        let total = count.max(1);
        let mut parts = Vec::new();

        for i in 0..count {
            doc.set_current_page(i);
            if let Some((content, _mime)) = doc.get_current_str() {
                parts.push(strip_tags(&content));
            }
            progress.report((((i + 1) * 100) / total) as u8);
        }

        Ok(parts.join("\n"))
    }
}
