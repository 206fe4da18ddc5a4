use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod job;

use job::{BankChoice, JobStatus, process_document, registry_lines};
use mutasi_core::Settings;
use mutasi_export::SinkFormat;

#[derive(Parser, Debug)]
#[command(name = "mutasi", version, about = "Extract Indonesian bank statement PDFs into spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract one or more statement PDFs into spreadsheets
    Extract {
        /// Statement PDF files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output folder (default: alongside the first input)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Statement format; `auto` tries every registered bank
        #[arg(long, value_enum, default_value = "auto")]
        bank: BankArg,

        /// Output format
        #[arg(long, value_enum, default_value = "xlsx")]
        format: FormatArg,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,
    },

    /// List registered bank formats and their detection keywords
    Banks,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BankArg {
    Auto,
    Bni,
    Mandiri,
    Livin,
    Ocbc,
    Bri,
    /// Generic single-table statement
    Table,
}

impl From<BankArg> for BankChoice {
    fn from(arg: BankArg) -> Self {
        match arg {
            BankArg::Auto => BankChoice::Auto,
            BankArg::Bni => BankChoice::Bni,
            BankArg::Mandiri => BankChoice::Mandiri,
            BankArg::Livin => BankChoice::Livin,
            BankArg::Ocbc => BankChoice::Ocbc,
            BankArg::Bri => BankChoice::Bri,
            BankArg::Table => BankChoice::Table,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for SinkFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => SinkFormat::Xlsx,
            FormatArg::Csv => SinkFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract { inputs, out, bank, format, force } => {
            run_extract(inputs, out, bank.into(), format.into(), force)
        }
        Command::Banks => {
            for line in registry_lines() {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn run_extract(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    bank: BankChoice,
    format: SinkFormat,
    force: bool,
) -> Result<()> {
    let out_dir = match out {
        Some(dir) => dir,
        None => inputs[0]
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output folder {}", out_dir.display()))?;

    let settings = Settings::load();
    let mut written = 0usize;
    let mut failed = 0usize;

    // Each document runs in isolation; one bad PDF never stops the batch.
    for pdf in &inputs {
        match process_document(pdf, &out_dir, bank, format, force, &settings) {
            Ok(JobStatus::Written { output, bank, rows }) => {
                written += 1;
                println!("{} -> {} ({} rows, {} format)", pdf.display(), output.display(), rows, bank);
            }
            Ok(JobStatus::SkippedExisting { output }) => {
                warn!(output = %output.display(), "output exists, skipping (use --force to overwrite)");
            }
            Err(err) => {
                failed += 1;
                error!(input = %pdf.display(), "{err:#}");
            }
        }
    }

    info!(written, failed, "batch finished");
    if written == 0 && failed > 0 {
        bail!("no documents were processed successfully");
    }
    Ok(())
}
