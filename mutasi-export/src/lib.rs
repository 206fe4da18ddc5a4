//! mutasi-export: write the normalized ledger to a spreadsheet.
//!
//! The styled XLSX sink honors the per-bank column configuration (visibility,
//! labels, colors, number formats, widths). The CSV sink shares the column
//! selection but writes plain values; it doubles as the last-resort fallback
//! when styling fails for a reason other than a locked destination.

pub mod columns;
pub mod sink;
pub mod xlsx;

pub use columns::{DEFAULT_COLUMNS, ExportColumn, visible_columns};
pub use sink::{SinkFormat, probe_writable, write_csv, write_spreadsheet};
pub use xlsx::{write_plain_xlsx, write_styled_xlsx};
