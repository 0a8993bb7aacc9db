use std::path::Path;

use crate::error::Result;
use crate::extract::Extractor;
use crate::progress::ProgressTx;

/// RTF extractor: control-word stripping to plain text.
pub struct RtfExtractor;

/// Destination groups whose content is metadata, not document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "generator",
    "pict",
    "object",
    "header",
    "footer",
    "headerl",
    "headerr",
    "headerf",
    "footerl",
    "footerr",
    "footerf",
    "themedata",
    "colorschememapping",
    "listtable",
    "listoverridetable",
    "latentstyles",
    "datastore",
    "xmlnstbl",
];

impl Default for RtfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RtfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Strip RTF control words and destination groups, keeping character runs.
pub(crate) fn rtf_to_text(input: &str) -> String {
    let mut out = String::new();
    let mut chars = input.chars().peekable();
    let mut depth: usize = 0;
    // Group depth at which a skipped destination started, if any.
    let mut skip_from: Option<usize> = None;

    while let Some(c) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if skip_from.is_some_and(|d| depth < d) {
                    skip_from = None;
                }
            }
            '\\' => match chars.peek().copied() {
                Some(escaped @ ('\\' | '{' | '}')) => {
                    chars.next();
                    if skip_from.is_none() {
                        out.push(escaped);
                    }
                }
                Some('\'') => {
                    chars.next();
                    let hi = chars.next();
                    let lo = chars.next();
                    if skip_from.is_none() {
                        if let (Some(hi), Some(lo)) = (hi, lo) {
                            let hex: String = [hi, lo].iter().collect();
                            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                                // cp1252 and latin-1 agree on everything the
                                // cleaner cares about.
                                out.push(char::from(byte));
                            }
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    if skip_from.is_none() {
                        skip_from = Some(depth);
                    }
                }
                Some('~') => {
                    chars.next();
                    if skip_from.is_none() {
                        out.push(' ');
                    }
                }
                Some('_') => {
                    chars.next();
                    if skip_from.is_none() {
                        out.push('-');
                    }
                }
                Some('-') => {
                    chars.next();
                }
                Some('\n' | '\r') => {
                    chars.next();
                    if skip_from.is_none() {
                        out.push('\n');
                    }
                }
                _ => {
                    let mut word = String::new();
                    while let Some(&p) = chars.peek() {
                        if !p.is_ascii_alphabetic() {
                            break;
                        }
                        word.push(p);
                        chars.next();
                    }
                    let mut param = String::new();
                    if chars.peek() == Some(&'-') {
                        param.push('-');
                        chars.next();
                    }
                    while let Some(&p) = chars.peek() {
                        if !p.is_ascii_digit() {
                            break;
                        }
                        param.push(p);
                        chars.next();
                    }
                    // One space after a control word is a delimiter.
                    if chars.peek() == Some(&' ') {
                        chars.next();
                    }

                    if SKIPPED_DESTINATIONS.contains(&word.as_str()) {
                        // A destination nested inside one already being
                        // skipped must not raise the skip floor.
                        if skip_from.is_none() {
                            skip_from = Some(depth);
                        }
                    } else if skip_from.is_none() {
                        match word.as_str() {
                            "par" | "line" | "sect" | "page" => out.push('\n'),
                            "tab" => out.push('\t'),
                            "emdash" | "endash" => out.push('-'),
                            "lquote" | "rquote" => out.push('\''),
                            "ldblquote" | "rdblquote" => out.push('"'),
                            "bullet" => out.push('-'),
                            "u" => {
                                if let Ok(code) = param.parse::<i32>() {
                                    let code = if code < 0 { code + 65536 } else { code };
                                    if let Some(ch) = char::from_u32(code as u32) {
                                        out.push(ch);
                                    }
                                    // The replacement character after \uN is
                                    // for non-Unicode readers only.
                                    if chars.peek() == Some(&'?') {
                                        chars.next();
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                }
            },
            '\n' | '\r' => {}
            _ => {
                if skip_from.is_none() {
                    out.push(c);
                }
            }
        }
    }

    out
}

impl Extractor for RtfExtractor {
    fn format(&self) -> &'static str {
        "rtf"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        progress.done();
        Ok(rtf_to_text(&content))
    }
}
