//! Lossy cell cleaning for amounts and debit/credit markers.
//!
//! Statement cells are messy: wrapped numbers, stray currency words, a `D` or
//! `C` marker glued to the amount. These helpers never fail; they degrade to
//! `0.0` / `None` so a malformed cell cannot abort the surrounding record.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d,.]+").expect("numeric regex"));

/// Extract the first numeric run from a cell and parse it as a decimal.
///
/// Commas are treated as thousands separators and stripped; `.` is the
/// decimal separator. Any input without a parseable run yields `0.0`.
pub fn clean_number(value: &str) -> f64 {
    let text = value.replace('\n', " ");
    let Some(run) = NUMERIC_RUN.find(text.trim()) else {
        return 0.0;
    };
    run.as_str().replace(',', "").parse().unwrap_or(0.0)
}

/// Debit/credit indicator as printed on the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbCrFlag {
    Debit,
    Credit,
}

/// Find a `D` or `C` marker in an amount/indicator cell.
///
/// The marker may stand alone, trail the amount, or follow it after a space.
/// Returns `None` when the cell is ambiguous so the caller can fall back to
/// scanning an alternate column.
pub fn clean_db_cr_flag(value: &str) -> Option<DbCrFlag> {
    if value.is_empty() {
        return None;
    }
    let text = value.replace('\n', " ").trim().to_uppercase();
    if text.contains(" D") || text.ends_with('D') || text == "D" {
        Some(DbCrFlag::Debit)
    } else if text.contains(" C") || text.ends_with('C') || text == "C" {
        Some(DbCrFlag::Credit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_number_thousands_and_decimals() {
        assert_eq!(clean_number("150,000.00"), 150_000.00);
        assert_eq!(clean_number("1,234,567.89"), 1_234_567.89);
        assert_eq!(clean_number("150,000.00 D"), 150_000.00);
        assert_eq!(clean_number("Rp 5,000.25"), 5_000.25);
    }

    #[test]
    fn test_clean_number_is_total() {
        assert_eq!(clean_number(""), 0.0);
        assert_eq!(clean_number("abc"), 0.0);
        assert_eq!(clean_number("-"), 0.0);
        assert_eq!(clean_number("..,,"), 0.0);
        assert_eq!(clean_number("1.2.3,4"), 0.0);
    }

    #[test]
    fn test_clean_number_is_idempotent() {
        for input in ["150,000.00", "0.00", "garbage", "12"] {
            let once = clean_number(input);
            let twice = clean_number(&once.to_string());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_db_cr_flag_variants() {
        assert_eq!(clean_db_cr_flag("150,000.00 D"), Some(DbCrFlag::Debit));
        assert_eq!(clean_db_cr_flag("D"), Some(DbCrFlag::Debit));
        assert_eq!(clean_db_cr_flag("150,000.00C"), Some(DbCrFlag::Credit));
        assert_eq!(clean_db_cr_flag("c"), Some(DbCrFlag::Credit));
        assert_eq!(clean_db_cr_flag("150,000.00"), None);
        assert_eq!(clean_db_cr_flag(""), None);
    }
}
