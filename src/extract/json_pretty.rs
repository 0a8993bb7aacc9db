use std::path::Path;

use crate::error::Result;
use crate::extract::Extractor;
use crate::progress::ProgressTx;

/// JSON extractor: parse and re-serialize pretty-printed (2-space indent,
/// non-ASCII preserved), a structural round-trip rather than raw file text.
pub struct JsonExtractor;

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for JsonExtractor {
    fn format(&self) -> &'static str {
        "json"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let pretty = serde_json::to_string_pretty(&value)?;
        progress.done();
        Ok(pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn extract(content: &str) -> Result<String> {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, content).unwrap();
        JsonExtractor::new().extract(&path, &mut ProgressTx::none())
    }

    #[test]
    fn pretty_prints_with_two_space_indent() {
        assert_eq!(extract(r#"{"a":1}"#).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn key_order_is_preserved() {
        let out = extract(r#"{"z":1,"a":2}"#).unwrap();
        assert!(out.find("\"z\"").unwrap() < out.find("\"a\"").unwrap());
    }

    #[test]
    fn non_ascii_is_preserved() {
        let out = extract(r#"{"saludo":"señal"}"#).unwrap();
        assert!(out.contains("señal"));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(extract("{oops").is_err());
    }
}
