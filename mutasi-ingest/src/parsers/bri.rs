//! BRI internet-banking statement parser (text lines).
//!
//! Expected extracted-text rows:
//!   01/02/23 10:00:00 TRF KE REKENING LAIN 1234567 100.00 0.00 5,000.00
//!   LANJUTAN KETERANGAN
//! interleaved with page footers ("Halaman 2", balance summaries, totals in
//! words) that must never reach the output.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::pdf::StatementDocument;
use mutasi_core::{TransactionRecord, clean_number, is_footer, merge_rows, swap_debit_credit};

/// date time description [user id] amount amount balance
static TXN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d{2}/\d{2}/\d{2})\s+\d{2}:\d{2}:\d{2}\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<id>\d{7,})?\s*",
        r"(?P<left>[\d,]+\.\d{2})\s+",
        r"(?P<right>[\d,]+\.\d{2})\s+",
        r"(?P<balance>[\d,]+\.\d{2})$"
    ))
    .expect("transaction regex")
});

/// A fresh timestamped row; anything else (and not a footer) continues the
/// open description.
static START_OF_ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{2}\s+\d{2}:\d{2}:\d{2}").expect("row-start regex"));

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_pages(&doc.page_texts()))
}

/// Parse extracted page texts into transactions.
///
/// Open rows are flushed at each page end; this layout never wraps a
/// transaction across a page break.
pub fn parse_pages(pages: &[String]) -> Vec<TransactionRecord> {
    let mut records = Vec::new();
    for page in pages {
        let lines = page
            .lines()
            .map(str::trim)
            .filter(|line| !is_footer(line))
            .filter(|line| TXN_RE.is_match(line) || !START_OF_ROW_RE.is_match(line));
        records.extend(merge_rows(lines, |line| parse_start(line), |rec, line| {
            rec.description.push(' ');
            rec.description.push_str(line.trim());
        }));
    }
    records
}

fn parse_start(line: &str) -> Option<TransactionRecord> {
    let caps = TXN_RE.captures(line)?;

    // The printed left/right amount order is inverted relative to the
    // internal debit/credit convention; decode positionally, then swap.
    let mut record = TransactionRecord {
        posting_date: caps["date"].to_string(),
        description: caps["desc"].trim().to_string(),
        reference: caps.name("id").map(|m| m.as_str().to_string()).unwrap_or_default(),
        debit: clean_number(&caps["left"]),
        credit: clean_number(&caps["right"]),
        balance: clean_number(&caps["balance"]),
    };
    swap_debit_credit(&mut record);
    Some(record)
}
