//! Sink orchestration: writability probe, format selection, fallback policy.

use anyhow::{Context, Result, bail};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

use crate::columns::{ColumnValue, visible_columns};
use crate::xlsx::{write_plain_xlsx, write_styled_xlsx};
use mutasi_core::{BankColumnConfig, TransactionRecord};

/// Output format for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    Xlsx,
    Csv,
}

impl SinkFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SinkFormat::Xlsx => "xlsx",
            SinkFormat::Csv => "csv",
        }
    }
}

/// Check that the destination can be opened for writing before any rendering
/// happens. A locked or permission-blocked file (spreadsheet still open in
/// another program) is the one sink error with a user fix, so it gets its own
/// message instead of the fallback path.
pub fn probe_writable(path: &Path) -> Result<()> {
    match OpenOptions::new().write(true).create(true).open(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            bail!(
                "cannot write {}: the file appears to be open in another program. \
                 Close it and retry.",
                path.display()
            );
        }
        Err(err) => Err(err).with_context(|| format!("open {} for writing", path.display())),
    }
}

/// Write the ledger to `path` in the requested format. Returns the number of
/// records written. A styled-XLSX failure that is not a lock falls back to
/// one unstyled write attempt; the in-memory records are untouched either
/// way.
pub fn write_spreadsheet(
    records: &[TransactionRecord],
    path: &Path,
    config: &BankColumnConfig,
    format: SinkFormat,
) -> Result<usize> {
    probe_writable(path)?;
    match format {
        SinkFormat::Csv => write_csv(records, path, config),
        SinkFormat::Xlsx => match write_styled_xlsx(records, path, config) {
            Ok(count) => Ok(count),
            Err(err) => {
                warn!(%err, "styled write failed, retrying unstyled");
                write_plain_xlsx(records, path, config)
            }
        },
    }
}

/// Plain CSV sink: configured columns and labels, unformatted values.
pub fn write_csv(
    records: &[TransactionRecord],
    path: &Path,
    config: &BankColumnConfig,
) -> Result<usize> {
    let columns = visible_columns(config);
    if columns.is_empty() {
        bail!("no visible columns configured");
    }

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

    let header: Vec<String> = columns
        .iter()
        .map(|(column, style)| style.resolved_label(column.key))
        .collect();
    writer.write_record(&header).context("write header")?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|(column, _)| match column.kind {
                ColumnValue::Text => column.text_value(record).to_string(),
                ColumnValue::Number => format!("{:.2}", column.number_value(record)),
            })
            .collect();
        writer.write_record(&row).context("write row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(records.len())
}
