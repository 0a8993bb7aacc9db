pub mod csv_rows;
pub mod docx;
pub mod epub_doc;
pub mod html;
pub mod json_pretty;
pub mod markdown;
pub mod odt;
mod ooxml;
pub mod pdf;
pub mod plaintext;
pub mod pptx;
pub mod rtf;
pub mod xlsx;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SiftError};
use crate::progress::ProgressTx;

/// A format-specific routine converting a document file into raw text.
///
/// Extractors report fractional progress through the sink when the format
/// has natural units (PDF pages, EPUB items); single-shot extractors emit
/// one terminal 100.
pub trait Extractor: Send + Sync {
    /// File extension served by this extractor, lowercase, without the dot.
    fn format(&self) -> &'static str;

    /// Extract the raw text of the document at `path`.
    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String>;
}

/// Routes files to the appropriate extractor based on their extension.
///
/// Built once at startup and never mutated afterwards; the registered set is
/// the authoritative list of accepted extensions for every shell.
pub struct Dispatcher {
    extractors: HashMap<String, Box<dyn Extractor>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        let registered: Vec<Box<dyn Extractor>> = vec![
            Box::new(pdf::PdfExtractor::new()),
            Box::new(docx::DocxExtractor::new()),
            Box::new(plaintext::PlaintextExtractor::new()),
            Box::new(html::HtmlExtractor::html()),
            Box::new(html::HtmlExtractor::xml()),
            Box::new(pptx::PptxExtractor::new()),
            Box::new(xlsx::XlsxExtractor::new()),
            Box::new(odt::OdtExtractor::new()),
            Box::new(rtf::RtfExtractor::new()),
            Box::new(epub_doc::EpubExtractor::new()),
            Box::new(markdown::MarkdownExtractor::new()),
            Box::new(json_pretty::JsonExtractor::new()),
            Box::new(csv_rows::CsvExtractor::new()),
        ];

        let mut extractors: HashMap<String, Box<dyn Extractor>> = HashMap::new();
        for extractor in registered {
            extractors.insert(extractor.format().to_string(), extractor);
        }

        Self { extractors }
    }

    /// Check if an extension (without dot, any case) has an extractor.
    #[must_use]
    pub fn supports(&self, ext: &str) -> bool {
        self.extractors.contains_key(&ext.to_ascii_lowercase())
    }

    /// Registered extensions, sorted, without dots.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self.extractors.keys().cloned().collect();
        exts.sort();
        exts
    }

    /// Extract the raw text of the file at `path`.
    ///
    /// The single normalization point for failures: missing file and unknown
    /// extension are rejected before any extraction attempt, and any error
    /// from the underlying extractor is rewrapped with the file name so that
    /// no per-library error type crosses this boundary.
    pub fn extract_text(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        if !path.is_file() {
            return Err(SiftError::NotAFile {
                path: path.display().to_string(),
            });
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let extractor = self
            .extractors
            .get(&ext)
            .ok_or(SiftError::UnsupportedFormat { ext })?;

        extractor.extract(path, progress).map_err(|e| match e {
            err @ SiftError::Extract { .. } => err,
            other => SiftError::Extract {
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                detail: other.to_string(),
            },
        })
    }
}

/// Build an `Extract` error carrying the failing file's name.
pub(crate) fn extract_err(path: &Path, detail: impl Into<String>) -> SiftError {
    SiftError::Extract {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        detail: detail.into(),
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dispatcher_registers_all_thirteen_formats() {
        let d = Dispatcher::new();
        for ext in [
            "pdf", "docx", "txt", "html", "xml", "pptx", "xlsx", "odt", "rtf", "epub", "md",
            "json", "csv",
        ] {
            assert!(d.supports(ext), "missing extractor for .{ext}");
        }
        assert_eq!(d.extensions().len(), 13);
    }

    #[test]
    fn supports_is_case_insensitive() {
        let d = Dispatcher::new();
        assert!(d.supports("PDF"));
        assert!(d.supports("Json"));
        assert!(!d.supports("xyz"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sample.xyz");
        fs::write(&path, "data").unwrap();

        let err = Dispatcher::new()
            .extract_text(&path, &mut ProgressTx::none())
            .unwrap_err();
        assert!(matches!(err, SiftError::UnsupportedFormat { ext } if ext == "xyz"));
    }

    #[test]
    fn extensionless_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("noext");
        fs::write(&path, "data").unwrap();

        let err = Dispatcher::new()
            .extract_text(&path, &mut ProgressTx::none())
            .unwrap_err();
        assert!(matches!(err, SiftError::UnsupportedFormat { ext } if ext.is_empty()));
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = Dispatcher::new()
            .extract_text(Path::new("/no/such/file.txt"), &mut ProgressTx::none())
            .unwrap_err();
        assert!(matches!(err, SiftError::NotAFile { .. }));
    }

    #[test]
    fn extractor_failure_carries_file_name() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = Dispatcher::new()
            .extract_text(&path, &mut ProgressTx::none())
            .unwrap_err();
        match err {
            SiftError::Extract { file, detail } => {
                assert_eq!(file, "broken.json");
                assert!(!detail.is_empty());
            }
            other => panic!("expected Extract error, got {other:?}"),
        }
    }

    #[test]
    fn single_shot_extraction_reports_terminal_progress() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("note.txt");
        fs::write(&path, "hello").unwrap();

        let (mut progress, rx) = ProgressTx::channel();
        Dispatcher::new().extract_text(&path, &mut progress).unwrap();
        drop(progress);

        let received: Vec<u8> = rx.iter().collect();
        assert_eq!(received, vec![100]);
    }
}
