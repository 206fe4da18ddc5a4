//! mutasi-ingest: PDF text/pseudo-table extraction and the per-bank
//! statement parsers, plus the auto-detection dispatcher.

pub mod columns;
pub mod detect;
pub mod parsers;
pub mod pdf;

pub use columns::{ColumnRoles, resolve_column_roles};
pub use detect::{BankFormat, BankId, ParseFn, REGISTRY, detect_and_parse, rank_candidates};
pub use pdf::StatementDocument;
