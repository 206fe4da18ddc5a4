//! OCBC statement parser (header-guarded table).
//!
//! Rows are ignored until the statement's own column header shows up
//! (TRANS + URAIAN/DESCRIPTION + VALUTA), which keeps account-summary tables
//! on the opening pages out of the ledger. A transaction starts on a dated
//! row or on a brought-forward balance row; wrapped description cells
//! continue the open row.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::columns::{cell_at, resolve_column_roles};
use crate::pdf::StatementDocument;
use mutasi_core::{TransactionRecord, clean_cell, clean_number, merge_rows, swap_debit_credit};

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}/\d{1,2}").expect("date-token regex"));

const CARRY_FORWARD_KEYWORDS: &[&str] =
    &["BEGINNING BALANCE", "SALDO AWAL", "SALDO SEBELUMNYA", "BROUGHT FORWARD"];

/// True for the OCBC column-header row.
fn is_header_row(row: &[String]) -> bool {
    let row_str = row.join(" ").to_uppercase();
    row_str.contains("TRANS")
        && (row_str.contains("URAIAN") || row_str.contains("DESCRIPTION"))
        && row_str.contains("VALUTA")
}

/// A row starts a transaction when its first cell carries a `D/M` date token
/// or the row is a brought-forward balance line.
fn is_new_transaction(row: &[String]) -> bool {
    let first = row.first().map(String::as_str).unwrap_or("");
    if DATE_TOKEN_RE.is_match(first) {
        return true;
    }
    let row_text = row.join(" ").to_uppercase();
    CARRY_FORWARD_KEYWORDS.iter().any(|kw| row_text.contains(kw))
}

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_rows(&doc.page_rows()))
}

/// Parse per-page rows into transactions; the table may span pages, so the
/// open row only flushes at document end.
pub fn parse_rows(pages: &[Vec<Vec<String>>]) -> Vec<TransactionRecord> {
    let mut header: Option<Vec<String>> = None;
    let mut data_rows: Vec<Vec<String>> = Vec::new();

    for row in pages.iter().flatten() {
        let cleaned: Vec<String> = row.iter().map(|c| clean_cell(c)).collect();
        if cleaned.iter().all(String::is_empty) {
            continue;
        }
        if is_header_row(&cleaned) {
            header.get_or_insert(cleaned);
            continue;
        }
        if header.is_some() {
            data_rows.push(cleaned);
        }
    }

    let Some(header) = header else {
        return Vec::new();
    };
    let roles = resolve_column_roles(&header);

    let merged = merge_rows(
        data_rows,
        |row| is_new_transaction(row).then(|| row.clone()),
        |current, row| {
            let desc_part = row.get(2).map(String::as_str).unwrap_or("");
            if !desc_part.is_empty() && current.len() > 2 {
                current[2].push(' ');
                current[2].push_str(desc_part);
            }
        },
    );

    merged
        .iter()
        .map(|row| {
            let mut record = TransactionRecord {
                posting_date: cell_at(row, roles.date.or(Some(0))).to_string(),
                description: cell_at(row, roles.description).to_string(),
                reference: cell_at(row, roles.reference).to_string(),
                debit: clean_number(cell_at(row, roles.debit)),
                credit: clean_number(cell_at(row, roles.credit)),
                balance: clean_number(cell_at(row, roles.balance)),
            };
            swap_debit_credit(&mut record);
            record
        })
        .collect()
}
