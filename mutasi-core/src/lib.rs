//! mutasi-core: canonical transaction record, shared cell cleaning, footer
//! classification, the continuation-merge driver, and the column style
//! configuration consumed by the export layer.

pub mod config;
pub mod footer;
pub mod merge;
pub mod numeric;
pub mod record;

pub use config::{BankColumnConfig, ColumnAlign, ColumnFormat, ColumnStyle, Settings, settings_path};
pub use footer::is_footer;
pub use merge::merge_rows;
pub use numeric::{DbCrFlag, clean_db_cr_flag, clean_number};
pub use record::{TransactionRecord, clean_cell, swap_debit_credit};
