use std::sync::OnceLock;

use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::config::CleanSettings;
use crate::error::{Result, SiftError};

/// Line-classification cleaning pass over extracted raw text.
///
/// Discards noise lines (boilerplate phrases, page-number artifacts),
/// wraps detected command/code lines in fences, promotes all-caps lines to
/// Markdown headings and normalizes list bullets. Pure and total: any input
/// string yields a (possibly empty) output string.
pub struct Cleaner {
    noise: RegexSet,
    code_prompt: Regex,
    title: Regex,
    list_item: Regex,
    bullet: Regex,
    blank_runs: Regex,
    heading_gap: Regex,
    fence_before: Regex,
    fence_after: Regex,
    title_max_words: usize,
}

impl Cleaner {
    /// Compile the cleaning patterns for the given settings.
    pub fn new(settings: &CleanSettings) -> Result<Self> {
        let phrases: Vec<String> = settings
            .noise_phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect();
        let noise = RegexSetBuilder::new(&phrases)
            .case_insensitive(true)
            .build()
            .map_err(|e| SiftError::Config(format!("bad noise phrase: {e}")))?;

        let title = Regex::new(&format!(
            r"^\s*[A-Z\s]{{{},{}}}\s*$",
            settings.title_min_len, settings.title_max_len
        ))
        .map_err(|e| SiftError::Config(format!("bad title bounds: {e}")))?;

        Ok(Self {
            noise,
            code_prompt: Regex::new(r"^\s*(?:>>>|\$|#|~|\.\.\.)\s").unwrap(),
            title,
            list_item: Regex::new(r"^\s*[-*•]\s+|^\s*\d+\.\s+").unwrap(),
            bullet: Regex::new(r"^\s*[-*•]").unwrap(),
            blank_runs: Regex::new(r"\n{3,}").unwrap(),
            heading_gap: Regex::new(r"(\n## .*?)\n+").unwrap(),
            fence_before: Regex::new(r"\n(```)").unwrap(),
            fence_after: Regex::new(r"(```)\n").unwrap(),
            title_max_words: settings.title_max_words,
        })
    }

    /// Clean raw text and annotate its structure with Markdown markers.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut in_code_block = false;

        for line in raw.split('\n') {
            let trimmed = line.trim();

            // Blank lines, boilerplate and bare page numbers are dropped
            // without touching the code-block state.
            if trimmed.is_empty()
                || self.noise.is_match(trimmed)
                || trimmed.chars().all(char::is_numeric)
            {
                continue;
            }

            if self.code_prompt.is_match(line) {
                if !in_code_block {
                    out.push("\n```python".into());
                    in_code_block = true;
                }
                out.push(line.into());
                continue;
            } else if in_code_block {
                out.push("```\n".into());
                in_code_block = false;
            }

            if self.title.is_match(trimmed)
                && trimmed.split_whitespace().count() < self.title_max_words
            {
                out.push(format!("## {trimmed}\n"));
                continue;
            }

            if self.list_item.is_match(trimmed) {
                // Only bullet characters are normalized; "1." items pass
                // through unchanged.
                out.push(self.bullet.replace(trimmed, "-").into_owned());
                continue;
            }

            out.push(trimmed.into());
        }

        if in_code_block {
            out.push("```\n".into());
        }

        let text = out.join("\n");

        let text = self.blank_runs.replace_all(&text, "\n\n");
        let text = self.heading_gap.replace_all(&text, "${1}\n\n");
        let text = self.fence_before.replace_all(&text, "\n\n${1}");
        let text = self.fence_after.replace_all(&text, "${1}\n\n");

        text.trim().to_string()
    }
}

/// Clean with the default settings (compiled once per process).
#[must_use]
pub fn clean_and_structure(raw: &str) -> String {
    static DEFAULT: OnceLock<Cleaner> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            Cleaner::new(&CleanSettings::default()).expect("default clean settings are valid")
        })
        .clean(raw)
}
