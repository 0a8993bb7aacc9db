use std::path::Path;

use crate::error::Result;
use crate::extract::{extract_err, ooxml, Extractor};
use crate::progress::ProgressTx;

/// PowerPoint extractor: all shape text across slides, in slide order.
pub struct PptxExtractor;

impl Default for PptxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PptxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Slide entries in numeric order ("slide2" before "slide10").
    fn slide_entries(names: &[String]) -> Vec<(u32, &String)> {
        let mut slides: Vec<(u32, &String)> = names
            .iter()
            .filter_map(|name| {
                let rest = name.strip_prefix("ppt/slides/slide")?;
                let number: u32 = rest.strip_suffix(".xml")?.parse().ok()?;
                Some((number, name))
            })
            .collect();
        slides.sort_by_key(|(number, _)| *number);
        slides
    }
}

impl Extractor for PptxExtractor {
    fn format(&self) -> &'static str {
        "pptx"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let names = ooxml::entry_names(path)?;
        let mut texts = Vec::new();

        for (_, entry) in Self::slide_entries(&names) {
            let xml = ooxml::read_entry(path, entry)?;
            let paragraphs = ooxml::run_paragraphs(&xml)
                .map_err(|e| extract_err(path, format!("malformed {entry}: {e}")))?;
            texts.extend(paragraphs);
        }

        progress.done();
        Ok(texts.join("\n"))
    }
}
