//! Per-document extraction job: parse one PDF, write one spreadsheet.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

use mutasi_core::{Settings, TransactionRecord};
use mutasi_export::{SinkFormat, write_spreadsheet};
use mutasi_ingest::{REGISTRY, detect_and_parse};

/// Bank selection for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankChoice {
    /// Rank by first-page keywords, then try every registered format
    Auto,
    Bni,
    Mandiri,
    Livin,
    Ocbc,
    Bri,
    /// Generic single-table layout (not auto-detected)
    Table,
}

impl BankChoice {
    fn label(&self) -> &'static str {
        match self {
            BankChoice::Auto => "Auto",
            BankChoice::Bni => "BNI",
            BankChoice::Mandiri => "Mandiri",
            BankChoice::Livin => "Livin",
            BankChoice::Ocbc => "OCBC",
            BankChoice::Bri => "BRI",
            BankChoice::Table => "General",
        }
    }
}

/// What happened to one input document.
#[derive(Debug)]
pub enum JobStatus {
    Written { output: PathBuf, bank: &'static str, rows: usize },
    SkippedExisting { output: PathBuf },
}

/// Output path: the PDF stem moved into `out_dir` with the sink extension.
pub fn output_path(pdf: &Path, out_dir: &Path, format: SinkFormat) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or_default();
    out_dir.join(stem).with_extension(format.extension())
}

fn parse_with(choice: BankChoice, pdf: &Path) -> Result<(&'static str, Vec<TransactionRecord>)> {
    match choice {
        BankChoice::Auto => {
            let (format, records) = detect_and_parse(pdf)?;
            Ok((format.label, records))
        }
        BankChoice::Table => {
            let records = mutasi_ingest::parsers::generic::parse(pdf)?;
            Ok((choice.label(), records))
        }
        BankChoice::Bni => Ok((choice.label(), mutasi_ingest::parsers::bni::parse(pdf)?)),
        BankChoice::Mandiri => Ok((choice.label(), mutasi_ingest::parsers::mandiri::parse(pdf)?)),
        BankChoice::Livin => Ok((choice.label(), mutasi_ingest::parsers::livin::parse(pdf)?)),
        BankChoice::Ocbc => Ok((choice.label(), mutasi_ingest::parsers::ocbc::parse(pdf)?)),
        BankChoice::Bri => Ok((choice.label(), mutasi_ingest::parsers::bri::parse(pdf)?)),
    }
}

/// Run one document end to end. Parser state lives entirely inside this call,
/// so documents in a batch cannot leak rows into each other.
pub fn process_document(
    pdf: &Path,
    out_dir: &Path,
    choice: BankChoice,
    format: SinkFormat,
    force: bool,
    settings: &Settings,
) -> Result<JobStatus> {
    if !pdf.is_file() {
        bail!("input not found: {}", pdf.display());
    }

    let output = output_path(pdf, out_dir, format);
    if output.exists() && !force {
        return Ok(JobStatus::SkippedExisting { output });
    }

    let (bank, records) = parse_with(choice, pdf)
        .with_context(|| format!("parsing {}", pdf.display()))?;
    if records.is_empty() {
        bail!("no transactions recognized in {} ({} format)", pdf.display(), bank);
    }

    let config = settings.column_config(bank);
    let rows = write_spreadsheet(&records, &output, &config, format)?;
    info!(bank, rows, output = %output.display(), "statement extracted");
    Ok(JobStatus::Written { output, bank, rows })
}

/// Registered formats with their detection keywords, for `mutasi banks`.
pub fn registry_lines() -> Vec<String> {
    REGISTRY
        .iter()
        .map(|format| format!("{:<8} {}", format.label, format.keywords.join(", ")))
        .collect()
}
