//! Header column-role resolution for table-shaped statements.
//!
//! Statement tables label the same columns differently per bank and per
//! language (Keterangan/Uraian/Description, Debet/Debit, Kredit/Credit,
//! Saldo/Balance). The resolver maps a header row to column indices once, so
//! the row loops stay free of header heuristics.

/// Column indices resolved from a header row. `None` means the header does
/// not carry that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub reference: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub balance: Option<usize>,
}

impl ColumnRoles {
    /// True when the header located both amount columns.
    pub fn has_amounts(&self) -> bool {
        self.debit.is_some() && self.credit.is_some()
    }
}

fn find_cell(header: &[String], keywords: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        keywords.iter().any(|kw| cell.contains(kw))
    })
}

/// Map a header row to column roles by case-insensitive substring search.
/// The first matching cell wins per role.
pub fn resolve_column_roles(header: &[String]) -> ColumnRoles {
    ColumnRoles {
        date: find_cell(header, &["posting date", "post date", "tanggal", "tgl", "date"]),
        description: find_cell(header, &["keterangan", "uraian", "remark", "description"]),
        reference: find_cell(header, &["reference", "journal", "ref"]),
        debit: find_cell(header, &["deb"]),
        credit: find_cell(header, &["kre", "cre"]),
        balance: find_cell(header, &["saldo", "balance"]),
    }
}

/// Defensive cell lookup: out-of-range or unresolved roles read as empty.
pub fn cell_at<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}
