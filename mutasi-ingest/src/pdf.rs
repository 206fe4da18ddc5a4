//! Extraction adapter: page text and best-effort pseudo-table rows.
//!
//! The statement layouts are printed tables, but all the adapter can promise
//! is line-by-line text per page and a whitespace-anchored split of each line
//! into cells. The parsers own every semantic decision and tolerate ragged
//! rows, so the adapter stays a thin boundary around lopdf.

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// An opened statement PDF with its pages in document order.
pub struct StatementDocument {
    doc: Document,
    pages: Vec<u32>,
}

impl StatementDocument {
    /// Load a readable, unencrypted PDF. Decryption is the caller's problem;
    /// an unloadable document is a per-document error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path).with_context(|| format!("open {}", path.display()))?;
        let pages = doc.get_pages().keys().copied().collect();
        Ok(Self { doc, pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Raw text of one page (0-based index). A page whose content streams
    /// cannot be decoded yields an empty string so one bad page never sinks
    /// the document.
    pub fn page_text(&self, index: usize) -> String {
        let Some(&page_no) = self.pages.get(index) else {
            return String::new();
        };
        match self.doc.extract_text(&[page_no]) {
            Ok(text) => text,
            Err(err) => {
                debug!(page = page_no, %err, "page text extraction failed");
                String::new()
            }
        }
    }

    /// Text of every page, in reading order.
    pub fn page_texts(&self) -> Vec<String> {
        (0..self.page_count()).map(|i| self.page_text(i)).collect()
    }

    /// Pseudo-table rows of every page: each non-blank line split into cells.
    pub fn page_rows(&self) -> Vec<Vec<Vec<String>>> {
        self.page_texts().iter().map(|text| text_to_rows(text)).collect()
    }
}

/// Split one page of text into table-ish rows.
pub fn text_to_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_row(line))
        .collect()
}

/// Split a printed line into cells on runs of two or more spaces.
///
/// Single spaces stay inside a cell; column gaps in statement tables come out
/// of the text layer as wider runs.
pub fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut spaces = 0usize;

    for ch in line.trim_end().chars() {
        if ch == ' ' {
            spaces += 1;
            continue;
        }
        if spaces >= 2 && !cell.is_empty() {
            cells.push(std::mem::take(&mut cell));
        } else if spaces == 1 && !cell.is_empty() {
            cell.push(' ');
        }
        spaces = 0;
        cell.push(ch);
    }
    if !cell.is_empty() {
        cells.push(cell);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row_on_wide_gaps() {
        let row = split_row("01 Dec 2025  TRANSFER KE REKENING   123456789  100.00  5,000.00");
        assert_eq!(
            row,
            vec!["01 Dec 2025", "TRANSFER KE REKENING", "123456789", "100.00", "5,000.00"]
        );
    }

    #[test]
    fn test_split_row_keeps_single_spaces() {
        assert_eq!(split_row("SALDO AWAL"), vec!["SALDO AWAL"]);
        assert_eq!(split_row("  leading  gap"), vec!["leading", "gap"]);
    }

    #[test]
    fn test_text_to_rows_skips_blank_lines() {
        let rows = text_to_rows("a  b\n\n   \nc");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c"]]);
    }
}
