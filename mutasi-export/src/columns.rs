//! Canonical export columns and per-bank visibility/label resolution.

use mutasi_core::{BankColumnConfig, ColumnStyle, TransactionRecord};

/// The value a column reads out of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue {
    Text,
    Number,
}

/// One canonical output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportColumn {
    /// Internal key, the handle user configuration uses
    pub key: &'static str,
    pub kind: ColumnValue,
}

/// Canonical column order for every bank.
pub const DEFAULT_COLUMNS: &[ExportColumn] = &[
    ExportColumn { key: "posting_date", kind: ColumnValue::Text },
    ExportColumn { key: "description", kind: ColumnValue::Text },
    ExportColumn { key: "reference", kind: ColumnValue::Text },
    ExportColumn { key: "debit", kind: ColumnValue::Number },
    ExportColumn { key: "credit", kind: ColumnValue::Number },
    ExportColumn { key: "balance", kind: ColumnValue::Number },
];

impl ExportColumn {
    pub fn text_value<'a>(&self, record: &'a TransactionRecord) -> &'a str {
        match self.key {
            "posting_date" => &record.posting_date,
            "description" => &record.description,
            "reference" => &record.reference,
            _ => "",
        }
    }

    pub fn number_value(&self, record: &TransactionRecord) -> f64 {
        match self.key {
            "debit" => record.debit,
            "credit" => record.credit,
            "balance" => record.balance,
            _ => 0.0,
        }
    }
}

/// The visible columns with their resolved styles, in canonical order.
pub fn visible_columns(config: &BankColumnConfig) -> Vec<(ExportColumn, ColumnStyle)> {
    DEFAULT_COLUMNS
        .iter()
        .map(|column| (*column, config.get(column.key).cloned().unwrap_or_default()))
        .filter(|(_, style)| style.visible)
        .collect()
}
