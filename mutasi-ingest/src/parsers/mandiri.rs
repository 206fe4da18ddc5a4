//! Mandiri statement parser (signature-validated table).
//!
//! Two layouts carry the same data: the rekening-koran table (Keterangan/
//! Description + Cabang/Branch columns) and the account-statement table
//! (Posting Date + Remark). Leading pages that do not open with either
//! header are skipped wholesale; once the header is found, every later row
//! on any page is a data row.

use anyhow::Result;
use std::path::Path;

use crate::columns::{ColumnRoles, cell_at, resolve_column_roles};
use crate::pdf::StatementDocument;
use mutasi_core::{TransactionRecord, clean_cell, clean_number, swap_debit_credit};

/// True when a header row identifies one of the two Mandiri layouts.
pub fn header_signature_matches(header: &[String]) -> bool {
    let header_str = header.join(" ").to_uppercase();
    let rekening_koran = (header_str.contains("KETERANGAN") || header_str.contains("DESCRIPTION"))
        && (header_str.contains("CABANG") || header_str.contains("BRANCH"));
    let account_statement = header_str.contains("POSTING DATE") && header_str.contains("REMARK");
    rekening_koran || account_statement
}

pub fn parse(path: &Path) -> Result<Vec<TransactionRecord>> {
    let doc = StatementDocument::open(path)?;
    Ok(parse_rows(&doc.page_rows()))
}

/// Parse per-page rows; pages are skipped until one opens with a valid
/// Mandiri header. Returns an empty list when no page does.
pub fn parse_rows(pages: &[Vec<Vec<String>>]) -> Vec<TransactionRecord> {
    let mut roles: Option<ColumnRoles> = None;
    let mut records = Vec::new();

    for page in pages {
        let data = if roles.is_some() {
            &page[..]
        } else {
            match page.first() {
                Some(first) if header_signature_matches(first) => {
                    roles = Some(resolve_column_roles(first));
                    &page[1..]
                }
                _ => continue,
            }
        };
        let Some(resolved) = roles.as_ref() else { continue };

        for row in data {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let mut record = TransactionRecord {
                posting_date: clean_cell(cell_at(row, resolved.date.or(Some(0)))),
                description: clean_cell(cell_at(row, resolved.description)),
                reference: clean_cell(cell_at(row, resolved.reference)),
                debit: clean_number(cell_at(row, resolved.debit)),
                credit: clean_number(cell_at(row, resolved.credit)),
                balance: clean_number(cell_at(row, resolved.balance)),
            };
            swap_debit_credit(&mut record);
            records.push(record);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    fn account_statement_header() -> Vec<String> {
        row(&["Posting Date", "Remark", "Reference No", "Debit", "Credit", "Balance"])
    }

    #[test]
    fn test_signature_accepts_both_layouts() {
        assert!(header_signature_matches(&account_statement_header()));
        assert!(header_signature_matches(&row(&["Tanggal", "Keterangan", "Cabang", "Debit", "Kredit", "Saldo"])));
        assert!(header_signature_matches(&row(&["Date", "Description", "Branch", "Debit", "Credit", "Balance"])));
        assert!(!header_signature_matches(&row(&["Tanggal", "Keterangan", "Debit", "Kredit", "Saldo"])));
        assert!(!header_signature_matches(&row(&["No", "Uraian", "Jumlah"])));
    }

    #[test]
    fn test_skips_leading_pages_without_signature() {
        let pages = vec![
            vec![row(&["REKENING GIRO"]), row(&["PT CONTOH SEJAHTERA"])],
            vec![
                account_statement_header(),
                row(&["01/10/2025", "BIAYA ADMIN", "J123", "10,000.00", "0.00", "990,000.00"]),
            ],
            vec![row(&["02/10/2025", "SETORAN", "J124", "0.00", "50,000.00", "1,040,000.00"])],
        ];
        let records = parse_rows(&pages);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "BIAYA ADMIN");
        assert_eq!(records[0].reference, "J123");
        // swapped: the printed Debit amount lands in credit
        assert_eq!(records[0].credit, 10_000.00);
        assert_eq!(records[0].debit, 0.00);
        assert_eq!(records[1].debit, 50_000.00);
        assert_eq!(records[1].balance, 1_040_000.00);
    }

    #[test]
    fn test_no_signature_yields_empty() {
        let pages = vec![vec![
            row(&["Some", "Other", "Table"]),
            row(&["1", "2", "3"]),
        ]];
        assert!(parse_rows(&pages).is_empty());
    }
}
