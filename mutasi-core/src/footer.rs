//! Boilerplate classification for line-based statement text.
//!
//! Matches the fixed footer/noise blocks that interleave with transaction
//! lines: page numbers, opening/closing balance summaries, totals-in-words,
//! stamp-duty notices, print timestamps. A matching line is discarded before
//! the merge loop ever sees it.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

fn ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("footer regex")
}

static FOOTER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        ci(r"halaman\s+\d+"),
        ci(r"saldo akhir"),
        ci(r"jumlah\s+mutasi"),
        ci(r"rekening\s+koran"),
        ci(r"^\s*$"),
        Regex::new(r"Created By IBBIZ").expect("footer regex"),
        Regex::new(r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}").expect("footer regex"),
        ci(r"saldo awal"),
        ci(r"opening balance"),
        ci(r"closing balance"),
        ci(r"total transaksi debet"),
        ci(r"total debit transaction"),
        ci(r"total transaksi kredit"),
        ci(r"total credit transaction"),
        ci(r"terbilang"),
        ci(r"in words"),
        ci(r"biaya materai"),
        ci(r"revenue stamp paid"),
    ]
});

/// True when the line is statement boilerplate rather than transaction data.
pub fn is_footer(line: &str) -> bool {
    FOOTER_PATTERNS.iter().any(|p| p.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_lines_match() {
        assert!(is_footer("Halaman 2 dari 5"));
        assert!(is_footer("SALDO AKHIR 1,000,000.00"));
        assert!(is_footer("Saldo Awal : 500.00"));
        assert!(is_footer(""));
        assert!(is_footer("   "));
        assert!(is_footer("Created By IBBIZ"));
        assert!(is_footer("Dicetak 01/02/2023 10:00:00"));
        assert!(is_footer("Terbilang: satu juta rupiah"));
        assert!(is_footer("Biaya Materai Rp 10,000"));
    }

    #[test]
    fn test_transaction_lines_pass_through() {
        assert!(!is_footer("01/02/23 10:00:00 TRANSFER MASUK 100.00 0.00 5,000.00"));
        assert!(!is_footer("LANJUTAN KETERANGAN TRANSFER"));
    }
}
