//! Statement format auto-detection.
//!
//! Keyword hits on the first page only *rank* the candidates; every
//! registered parser is still tried, because a missing keyword never proves
//! a format is absent (scanned text is lossy and bilingual). The first
//! parser returning a non-empty ledger wins.

use anyhow::{Result, bail};
use std::path::Path;
use tracing::{debug, info};

use crate::parsers;
use crate::pdf::StatementDocument;
use mutasi_core::TransactionRecord;

/// Registered statement formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankId {
    Bni,
    Mandiri,
    Livin,
    Ocbc,
    Bri,
}

pub type ParseFn = fn(&Path) -> Result<Vec<TransactionRecord>>;

/// One dispatcher registry entry. Adding a bank means appending an entry
/// here plus a parser module satisfying the common contract.
pub struct BankFormat {
    pub id: BankId,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub parse: ParseFn,
}

/// Detection order matters: specific signatures first, the permissive
/// line-regex format last.
pub const REGISTRY: &[BankFormat] = &[
    BankFormat {
        id: BankId::Bni,
        label: "BNI",
        keywords: &["BANK NEGARA INDONESIA", "BNIDIRECT"],
        parse: parsers::bni::parse,
    },
    BankFormat {
        id: BankId::Mandiri,
        label: "Mandiri",
        keywords: &["BANK MANDIRI", "MANDIRI", "ACCOUNT STATEMENT"],
        parse: parsers::mandiri::parse,
    },
    BankFormat {
        id: BankId::Livin,
        label: "Livin",
        keywords: &["LIVIN BY MANDIRI"],
        parse: parsers::livin::parse,
    },
    BankFormat {
        id: BankId::Ocbc,
        label: "OCBC",
        keywords: &["OCBC NISP", "BANK OCBC", "OCBC"],
        parse: parsers::ocbc::parse,
    },
    BankFormat {
        id: BankId::Bri,
        label: "BRI",
        keywords: &["BANK RAKYAT INDONESIA", "BRIDIRECT", "IBBIZ", "IBIZ", "BRI"],
        parse: parsers::bri::parse,
    },
];

/// Rank the registry against upper-cased first-page text: formats with a
/// keyword hit first, everything else after, registration order preserved
/// within each group.
pub fn rank_candidates(first_page_upper: &str) -> Vec<&'static BankFormat> {
    let (prioritized, others): (Vec<_>, Vec<_>) = REGISTRY
        .iter()
        .partition(|format| format.keywords.iter().any(|kw| first_page_upper.contains(kw)));
    prioritized.into_iter().chain(others).collect()
}

/// Try ranked candidates until one produces a non-empty ledger.
///
/// A candidate that errors (it may choke on a foreign layout) counts as a
/// non-match, not a failure; only exhausting every candidate is an error.
pub fn detect_and_parse(path: &Path) -> Result<(&'static BankFormat, Vec<TransactionRecord>)> {
    let first_page = match StatementDocument::open(path) {
        Ok(doc) => doc.page_text(0).to_uppercase(),
        Err(err) => {
            debug!(%err, "first-page probe failed, ranking without keywords");
            String::new()
        }
    };

    for format in rank_candidates(&first_page) {
        info!(bank = format.label, "trying statement format");
        match (format.parse)(path) {
            Ok(records) if !records.is_empty() => {
                info!(bank = format.label, rows = records.len(), "format detected");
                return Ok((format, records));
            }
            Ok(_) => debug!(bank = format.label, "no rows, trying next format"),
            Err(err) => debug!(bank = format.label, %err, "candidate failed, trying next format"),
        }
    }
    bail!("could not detect statement format for {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_hit_moves_format_first() {
        let ranked = rank_candidates("REKENING KORAN BNIDIRECT PERIODE OKTOBER");
        assert_eq!(ranked[0].id, BankId::Bni);
        // the rest keep registration order
        let rest: Vec<BankId> = ranked[1..].iter().map(|f| f.id).collect();
        assert_eq!(rest, vec![BankId::Mandiri, BankId::Livin, BankId::Ocbc, BankId::Bri]);
    }

    #[test]
    fn test_no_keyword_hit_keeps_registration_order() {
        let ranked = rank_candidates("STATEMENT WITH NO RECOGNIZABLE BRAND");
        let ids: Vec<BankId> = ranked.iter().map(|f| f.id).collect();
        assert_eq!(
            ids,
            vec![BankId::Bni, BankId::Mandiri, BankId::Livin, BankId::Ocbc, BankId::Bri]
        );
        // unmatched formats are still candidates: a keyword is a hint, not a gate
        assert_eq!(ranked.len(), REGISTRY.len());
    }

    #[test]
    fn test_multiple_hits_preserve_registration_order() {
        let ranked = rank_candidates("BANK MANDIRI OCBC NISP");
        let ids: Vec<BankId> = ranked.iter().map(|f| f.id).collect();
        assert_eq!(
            ids,
            vec![BankId::Mandiri, BankId::Ocbc, BankId::Bni, BankId::Livin, BankId::Bri]
        );
    }

    #[test]
    fn test_unreadable_document_is_an_error() {
        let missing = Path::new("/nonexistent/statement.pdf");
        assert!(detect_and_parse(missing).is_err());
    }
}
