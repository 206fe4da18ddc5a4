//! The normalized output record shared by every bank parser.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One statement line after parsing and continuation merging.
///
/// All six fields are always present; absent values are the empty string or
/// `0.0`, never omitted. A well-formed statement row has exactly one of
/// `debit`/`credit` non-zero, but this is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date token as printed (DD/MM/YY, DD/MM/YYYY or normalized DD/MM/YYYY)
    pub posting_date: String,
    /// Free text, accumulated from one or more continuation lines
    pub description: String,
    /// Transaction/journal reference or user id; "" or "-" when absent
    pub reference: String,
    /// Amount removed from the balance; 0.0 if not applicable
    pub debit: f64,
    /// Amount added to the balance; 0.0 if not applicable
    pub credit: f64,
    /// Running balance after the transaction, as printed
    pub balance: f64,
}

/// Exchange the decoded debit and credit values.
///
/// Every statement layout that prints the two amount columns in the order
/// opposite to the internal convention goes through this single step after
/// positional decoding. The function is its own inverse.
pub fn swap_debit_credit(record: &mut TransactionRecord) {
    std::mem::swap(&mut record.debit, &mut record.credit);
}

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Normalize a raw cell: newlines become spaces, runs collapse, ends trim.
pub fn clean_cell(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.replace('\n', " ").trim(), " ")
        .into_owned()
}
