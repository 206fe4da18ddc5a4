//! Livin' by Mandiri statement parser (text-anchored table).
//!
//! The app export has no ruled grid, so cell boundaries drift between rows
//! and wrapped descriptions spill into their own rows. Rows merge on a
//! leading `DD Mon YYYY` date; the merged row is then decoded from the right
//! edge, where the numeric tail (.. debit, credit, balance) is stable.

use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::pdf::StatementDocument;
use mutasi_core::{TransactionRecord, clean_cell, clean_number, merge_rows, swap_debit_credit};

static DATE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}\s+[A-Za-z]{3}\s+\d{4}").expect("date-start regex"));

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}\s+[A-Za-z]{3}\s+\d{4}").expect("date-token regex"));

static MONEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d,.\-]+$").expect("money regex"));

/// True when the cell opens a transaction (a `DD Mon YYYY` date).
fn is_date_start(cell: &str) -> bool {
    DATE_START_RE.is_match(cell.trim())
}

/// True when the cell looks like a printed amount.
fn is_money(cell: &str) -> bool {
    let cell = cell.trim();
    !cell.is_empty() && MONEY_RE.is_match(cell)
}

/// `01 Dec 2025, 10:31` → `01/12/2025`. Unparseable tokens pass through.
fn format_date(raw: &str) -> String {
    let head = raw.split(',').next().unwrap_or("").trim();
    let token = DATE_TOKEN_RE
        .find(head)
        .map(|m| m.as_str())
        .unwrap_or(head);
    match NaiveDate::parse_from_str(token, "%d %b %Y") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => token.to_string(),
    }
}

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_rows(&doc.page_rows()))
}

/// Parse per-page rows into transactions.
pub fn parse_rows(pages: &[Vec<Vec<String>>]) -> Vec<TransactionRecord> {
    let raw_rows = collect_data_rows(pages);

    let merged = merge_rows(
        raw_rows,
        |row| {
            let first = row.first().map(String::as_str).unwrap_or("");
            is_date_start(first).then(|| row.clone())
        },
        |current, row| {
            // Continuations extend the open row column-by-column; the date
            // column never continues.
            for idx in 1..row.len() {
                if idx < current.len() && !row[idx].is_empty() {
                    current[idx].push(' ');
                    current[idx].push_str(&row[idx]);
                }
            }
        },
    );

    merged.iter().map(|row| align_row(row)).collect()
}

/// Gather cleaned rows from every page, skipping each page's column header
/// (and anything above it) when one is present.
fn collect_data_rows(pages: &[Vec<Vec<String>>]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for page in pages {
        let start = page
            .iter()
            .position(|row| {
                let row_str = row.join(" ").to_lowercase();
                row_str.contains("posting date") || row_str.contains("tanggal")
            })
            .map(|idx| idx + 1)
            .unwrap_or(0);

        for row in &page[start..] {
            let cleaned: Vec<String> = row.iter().map(|c| clean_cell(c)).collect();
            if cleaned.iter().any(|c| !c.is_empty()) {
                rows.push(cleaned);
            }
        }
    }
    rows
}

/// Right-anchored decode of one merged logical row.
///
/// The last cell is the balance; walking left, a money-looking cell is the
/// credit and another one the debit. Whatever sits between the date and the
/// numeric tail is remark + reference; a lone trailing token that reads like
/// prose (spaced or longer than 25 chars) is a remark, not a reference.
fn align_row(cells: &[String]) -> TransactionRecord {
    let items: Vec<&str> = cells
        .iter()
        .map(String::as_str)
        .filter(|c| !c.trim().is_empty())
        .collect();

    let Some(&posting_date) = items.first() else {
        return TransactionRecord::default();
    };

    if items.len() < 4 {
        return TransactionRecord {
            posting_date: format_date(posting_date),
            description: "PARSE ERROR".to_string(),
            reference: "".to_string(),
            debit: 0.0,
            credit: 0.0,
            balance: 0.0,
        };
    }

    let balance = items[items.len() - 1];
    let mut credit = "0.00";
    let mut debit = "0.00";
    let middle: &[&str];

    if is_money(items[items.len() - 2]) {
        credit = items[items.len() - 2];
        if items.len() > 2 && is_money(items[items.len() - 3]) {
            debit = items[items.len() - 3];
            middle = &items[1..items.len() - 3];
        } else {
            middle = &items[1..items.len() - 2];
        }
    } else {
        middle = &items[1..items.len() - 1];
    }

    let mut reference = "-".to_string();
    let mut remark = String::new();
    if let Some((&last, rest)) = middle.split_last() {
        reference = last.to_string();
        remark = rest.join(" ");
        if remark.is_empty() && (reference.len() > 25 || reference.contains(' ')) {
            remark = std::mem::take(&mut reference);
            reference = "-".to_string();
        }
    }

    let mut record = TransactionRecord {
        posting_date: format_date(posting_date),
        description: remark,
        reference,
        debit: clean_number(debit),
        credit: clean_number(credit),
        balance: clean_number(balance),
    };
    swap_debit_credit(&mut record);
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    fn header_page(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        let mut page = vec![row(&["Posting Date", "Remark", "Reference No", "Debit", "Credit", "Balance"])];
        page.extend(rows);
        page
    }

    #[test]
    fn test_date_start_and_money_predicates() {
        assert!(is_date_start("01 Dec 2025"));
        assert!(is_date_start("1 Jan 2026, 10:31"));
        assert!(!is_date_start("TRANSFER KE"));
        assert!(is_money("1,000.00"));
        assert!(is_money("-"));
        assert!(!is_money("QR 123"));
        assert!(!is_money(""));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("01 Dec 2025"), "01/12/2025");
        assert_eq!(format_date("1 Jan 2026, 10:31"), "01/01/2026");
        assert_eq!(format_date("no date here"), "no date here");
    }

    #[test]
    fn test_full_row_decodes_right_anchored() {
        let pages = vec![header_page(vec![row(&[
            "01 Dec 2025",
            "TRANSFER KELUAR",
            "202512010001",
            "250,000.00",
            "0.00",
            "4,750,000.00",
        ])])];
        let records = parse_rows(&pages);
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.posting_date, "01/12/2025");
        assert_eq!(rec.description, "TRANSFER KELUAR");
        assert_eq!(rec.reference, "202512010001");
        // printed debit/credit positions are exchanged on export
        assert_eq!(rec.credit, 250_000.00);
        assert_eq!(rec.debit, 0.00);
        assert_eq!(rec.balance, 4_750_000.00);
    }

    #[test]
    fn test_wrapped_description_merges_before_decode() {
        let pages = vec![header_page(vec![
            row(&["01 Dec 2025", "PEMBAYARAN", "202512010002", "0.00", "100,000.00", "4,850,000.00"]),
            row(&["", "TAGIHAN LISTRIK", "", "", "", ""]),
        ])];
        let records = parse_rows(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "PEMBAYARAN TAGIHAN LISTRIK");
        assert_eq!(records[0].debit, 100_000.00);
        assert_eq!(records[0].credit, 0.00);
    }

    #[test]
    fn test_lone_prose_token_is_remark_not_reference() {
        let pages = vec![header_page(vec![row(&[
            "02 Dec 2025",
            "TOPUP E-WALLET VIA APLIKASI",
            "50,000.00",
            "0.00",
            "4,800,000.00",
        ])])];
        let records = parse_rows(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "TOPUP E-WALLET VIA APLIKASI");
        assert_eq!(records[0].reference, "-");
    }

    #[test]
    fn test_short_row_degrades_to_parse_error() {
        let pages = vec![header_page(vec![row(&["03 Dec 2025", "SALDO", "1.00"])])];
        let records = parse_rows(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "PARSE ERROR");
        assert_eq!(records[0].balance, 0.0);
    }

    #[test]
    fn test_continuation_before_any_start_is_dropped() {
        let pages = vec![header_page(vec![row(&["", "ORPHAN TEXT", "", "", "", ""])])];
        assert!(parse_rows(&pages).is_empty());
    }
}
