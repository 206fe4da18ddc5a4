//! Generic single-table statement parser.
//!
//! Takes the first extracted row of the document as the header and treats
//! every later non-empty row as a data row, with no signature check. Useful
//! for statements known to be one plain ruled table; too permissive to take
//! part in auto-detection, since it will accept any table it is pointed at.

use anyhow::Result;
use std::path::Path;

use crate::columns::{cell_at, resolve_column_roles};
use crate::pdf::StatementDocument;
use mutasi_core::{TransactionRecord, clean_cell, clean_number, swap_debit_credit};

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_rows(&doc.page_rows()))
}

/// Parse per-page pseudo-table rows; the first row seen is the header.
pub fn parse_rows(pages: &[Vec<Vec<String>>]) -> Vec<TransactionRecord> {
    let mut rows = pages.iter().flatten();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let roles = resolve_column_roles(header);

    rows.filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            // Printed Debit/Credit order is inverted relative to the internal
            // convention; decode by header position, then swap.
            let mut record = TransactionRecord {
                posting_date: clean_cell(cell_at(row, roles.date.or(Some(0)))),
                description: clean_cell(cell_at(row, roles.description)),
                reference: clean_cell(cell_at(row, roles.reference)),
                debit: clean_number(cell_at(row, roles.debit)),
                credit: clean_number(cell_at(row, roles.credit)),
                balance: clean_number(cell_at(row, roles.balance)),
            };
            swap_debit_credit(&mut record);
            record
        })
        .collect()
}
