use std::path::Path;

use crate::error::Result;
use crate::extract::{extract_err, ooxml, Extractor};
use crate::progress::ProgressTx;

/// OpenDocument text extractor: text:p paragraphs joined by newlines.
pub struct OdtExtractor;

impl Default for OdtExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OdtExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for OdtExtractor {
    fn format(&self) -> &'static str {
        "odt"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let xml = ooxml::read_entry(path, "content.xml")?;
        let paragraphs = ooxml::odt_paragraphs(&xml)
            .map_err(|e| extract_err(path, format!("malformed content.xml: {e}")))?;
        progress.done();
        Ok(paragraphs.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn extracts_odt_paragraphs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.odt");
        let file = std::fs::File::create(&path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        archive
            .start_file("content.xml", SimpleFileOptions::default())
            .unwrap();
        archive
            .write_all(
                br#"<office:document-content xmlns:text="ns">
                    <office:body><office:text>
                        <text:p>Hello <text:span>there</text:span></text:p>
                        <text:p>Bye</text:p>
                    </office:text></office:body>
                </office:document-content>"#,
            )
            .unwrap();
        archive.finish().unwrap();

        let text = OdtExtractor::new()
            .extract(&path, &mut ProgressTx::none())
            .unwrap();
        assert_eq!(text, "Hello there\nBye");
    }
}
