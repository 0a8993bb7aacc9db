use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};

use crate::error::Result;
use crate::extract::{extract_err, Extractor};
use crate::progress::ProgressTx;

/// Spreadsheet extractor: every sheet, every row; non-empty cells
/// stringified and space-joined, rows newline-joined.
pub struct XlsxExtractor;

impl Default for XlsxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for XlsxExtractor {
    fn format(&self) -> &'static str {
        "xlsx"
    }

    fn extract(&self, path: &Path, progress: &mut ProgressTx) -> Result<String> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e: XlsxError| extract_err(path, e.to_string()))?;

        let mut rows = Vec::new();
        for sheet in workbook.sheet_names().to_owned() {
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|e| extract_err(path, format!("sheet '{sheet}': {e}")))?;
            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .filter(|cell| !matches!(cell, Data::Empty))
                    .map(ToString::to_string)
                    .collect();
                rows.push(cells.join(" "));
            }
        }

        progress.done();
        Ok(rows.join("\n"))
    }
}
