//! BNI statement parser (ruled table with a numbered-row header).
//!
//! The header row carries a literal `No.` cell plus a posting-date column;
//! its position varies per export, so the column map is rebuilt per page by
//! keyword. Amounts sit in a single column with a trailing `D`/`C` marker;
//! on this layout the printed markers are inverted, so `D` books as a credit
//! and `C` as a debit.

use anyhow::Result;
use std::path::Path;

use crate::pdf::StatementDocument;
use mutasi_core::{
    DbCrFlag, TransactionRecord, clean_cell, clean_db_cr_flag, clean_number, merge_rows,
};

/// Column indices resolved from the BNI header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ColumnMap {
    journal: Option<usize>,
    no: Option<usize>,
    date: Option<usize>,
    branch: Option<usize>,
    balance: Option<usize>,
    amount: Option<usize>,
    db_cr: Option<usize>,
}

/// A header row holds an exact `no`/`no.` cell and a post-date cell.
fn is_header_row(cells: &[String]) -> bool {
    let lowered: Vec<String> = cells.iter().map(|c| c.trim().to_lowercase()).collect();
    let has_no = lowered.iter().any(|c| c == "no." || c == "no");
    let has_post_date = lowered.iter().any(|c| c == "post date" || c == "posting date");
    has_no && has_post_date
}

fn build_column_map(cells: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (i, cell) in cells.iter().enumerate() {
        let text = cell.trim().to_lowercase();
        if text.contains("journal") {
            map.journal.get_or_insert(i);
        } else if text == "no." || text == "no" {
            map.no.get_or_insert(i);
        } else if text.contains("date") {
            map.date.get_or_insert(i);
        } else if text.contains("branch") {
            map.branch.get_or_insert(i);
        } else if text.contains("balance") {
            map.balance.get_or_insert(i);
        }
        if text.contains("amount") {
            map.amount.get_or_insert(i);
        }
        if text.contains("db/cr") {
            map.db_cr.get_or_insert(i);
        }
    }
    // Some exports merge the marker into the amount column
    if map.amount.is_some() && map.db_cr.is_none() {
        map.db_cr = map.amount;
    }
    if map.db_cr.is_some() && map.amount.is_none() {
        map.amount = map.db_cr;
    }
    map
}

fn cell(row: &[String], index: Option<usize>, fallback: usize) -> &str {
    row.get(index.unwrap_or(fallback)).map(String::as_str).unwrap_or("")
}

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_rows(&doc.page_rows()))
}

/// Parse per-page rows. A page without the header row is skipped entirely;
/// open records flush at each page end.
pub fn parse_rows(pages: &[Vec<Vec<String>>]) -> Vec<TransactionRecord> {
    let mut records = Vec::new();

    for page in pages {
        let Some(header_idx) = page.iter().position(|row| is_header_row(row)) else {
            continue;
        };
        let map = build_column_map(&page[header_idx]);

        let data = page[header_idx + 1..].iter();
        records.extend(merge_rows(
            data,
            |row| parse_start(row, &map),
            |rec, row| {
                let extra = clean_cell(cell(row, map.branch, 2));
                if !extra.is_empty() {
                    rec.description.push(' ');
                    rec.description.push_str(&extra);
                }
            },
        ));
    }
    records
}

fn parse_start(row: &[String], map: &ColumnMap) -> Option<TransactionRecord> {
    let no = cell(row, map.no, 0).trim();
    if no.is_empty() {
        return None;
    }

    let date_cell = cell(row, map.date, 1);
    let posting_date = date_cell.lines().next().unwrap_or("").trim().to_string();
    let description = clean_cell(cell(row, map.branch, 2));
    let reference = cell(row, map.journal, 3).replace('\n', "").trim().to_string();

    let amount_cell = cell(row, map.amount, 5);
    let db_cr_cell = cell(row, map.db_cr, 5);
    let amount = clean_number(amount_cell);

    let mut flag = clean_db_cr_flag(db_cr_cell);
    if flag.is_none() && map.amount != map.db_cr {
        flag = clean_db_cr_flag(amount_cell);
    }

    // Marker semantics are inverted on this layout: D books as credit,
    // C as debit. Not post-swapped; the marker decides directly.
    let (debit, credit) = match flag {
        Some(DbCrFlag::Debit) => (0.0, amount),
        Some(DbCrFlag::Credit) => (amount, 0.0),
        None => (0.0, 0.0),
    };

    Some(TransactionRecord {
        posting_date,
        description,
        reference,
        debit,
        credit,
        balance: clean_number(cell(row, map.balance, 6)),
    })
}
