//! Per-bank statement parsers.
//!
//! Every parser exposes `parse(path) -> Result<Vec<TransactionRecord>>` plus
//! a path-free core over extracted pages for tests. An empty result means
//! "this is not that bank's layout", which the dispatcher uses to move on to
//! the next candidate.

pub mod bni;
pub mod bri;
pub mod generic;
pub mod livin;
pub mod mandiri;
pub mod ocbc;
