//! Shared helpers for the zip-container XML formats (DOCX, PPTX, ODT).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::extract::extract_err;

/// Read a named entry of a zip container as (lossily decoded) UTF-8.
pub(crate) fn read_entry(path: &Path, entry: &str) -> Result<String> {
    let file = File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| extract_err(path, format!("bad container: {e}")))?;
    let mut zipped = archive
        .by_name(entry)
        .map_err(|e| extract_err(path, format!("missing entry '{entry}': {e}")))?;
    let mut bytes = Vec::new();
    zipped
        .read_to_end(&mut bytes)
        .map_err(|e| extract_err(path, format!("unreadable entry '{entry}': {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// List the entry names of a zip container.
pub(crate) fn entry_names(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let archive =
        zip::ZipArchive::new(file).map_err(|e| extract_err(path, format!("bad container: {e}")))?;
    Ok(archive.file_names().map(String::from).collect())
}

/// Text of each paragraph (`w:p` / `a:p`) in an OOXML part, taking only the
/// character data of run text elements (`w:t` / `a:t`) so that inter-tag
/// whitespace never leaks into the output.
pub(crate) fn run_paragraphs(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut para_depth = 0usize;
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => para_depth += 1,
                b"t" if para_depth > 0 => in_run_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    para_depth = para_depth.saturating_sub(1);
                    if para_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"t" => in_run_text = false,
                _ => {}
            },
            Event::Text(t) => {
                if in_run_text {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Text of each `text:p` paragraph in ODT content, including nested spans,
/// with `text:s` and `text:tab` expanded.
pub(crate) fn odt_paragraphs(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut para_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"p" {
                    para_depth += 1;
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"p" {
                    para_depth = para_depth.saturating_sub(1);
                    if para_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
            }
            Event::Empty(e) if para_depth > 0 => match e.local_name().as_ref() {
                b"s" => current.push(' '),
                b"tab" => current.push('\t'),
                b"line-break" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) => {
                if para_depth > 0 {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
