use std::path::Path;

use comrak::{markdown_to_html, ComrakOptions};

use crate::error::Result;
use crate::extract::html::strip_tags;
use crate::extract::Extractor;
use crate::progress::ProgressTx;

/// Markdown extractor: rendered to HTML, then tag-stripped, so that marker
/// characters (#, *, backticks) never reach the cleaning pass as content.
pub struct MarkdownExtractor;

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for MarkdownExtractor {
    fn format(&self) -> &'static str {
        "md"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let html = markdown_to_html(&content, &ComrakOptions::default());
        progress.done();
        Ok(strip_tags(&html))
    }
}
