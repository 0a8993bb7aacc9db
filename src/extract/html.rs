use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::Html;

use crate::error::Result;
use crate::extract::{extract_err, Extractor};
use crate::progress::ProgressTx;

/// Tag-stripping extractor for markup documents, serving both `.html`
/// (forgiving HTML5 tree parse) and `.xml` (strict event parse).
pub struct HtmlExtractor {
    format: &'static str,
}

impl HtmlExtractor {
    #[must_use]
    pub fn html() -> Self {
        Self { format: "html" }
    }

    #[must_use]
    pub fn xml() -> Self {
        Self { format: "xml" }
    }
}

/// All text nodes of an HTML document, each trimmed, empty ones dropped,
/// joined by newlines.
pub(crate) fn strip_tags(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same shape for XML input, via the event parser.
fn strip_xml_tags(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut parts: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Text(t) => {
                let text = t.unescape()?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parts.join("\n"))
}

impl Extractor for HtmlExtractor {
    fn format(&self) -> &'static str {
        self.format
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);

        let text = if self.format == "xml" {
            strip_xml_tags(&content)
                .map_err(|e| extract_err(path, format!("malformed XML: {e}")))?
        } else {
            strip_tags(&content)
        };

        progress.done();
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn strip_tags_flattens_markup() {
        let html = "<html><body><h1>Title</h1><p>Some <b>bold</b> text.</p></body></html>";
        assert_eq!(strip_tags(html), "Title\nSome\nbold\ntext.");
    }

    #[test]
    fn strip_tags_drops_whitespace_nodes() {
        let html = "<div>\n  <p>only</p>\n  \n</div>";
        assert_eq!(strip_tags(html), "only");
    }

    #[test]
    fn strip_xml_tags_unescapes_entities() {
        let xml = "<root><item>a &amp; b</item><item>  </item><item>two</item></root>";
        assert_eq!(strip_xml_tags(xml).unwrap(), "a & b\ntwo");
    }

    #[test]
    fn extracts_html_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        std::fs::write(&path, "<p>hello</p><p>world</p>").unwrap();

        let text = HtmlExtractor::html()
            .extract(&path, &mut ProgressTx::none())
            .unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn formats_are_distinct() {
        assert_eq!(HtmlExtractor::html().format(), "html");
        assert_eq!(HtmlExtractor::xml().format(), "xml");
    }
}
