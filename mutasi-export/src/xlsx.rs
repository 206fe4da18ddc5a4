//! Styled XLSX writer driven by the per-bank column configuration.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

use crate::columns::{ColumnValue, visible_columns};
use mutasi_core::{BankColumnConfig, ColumnAlign, ColumnFormat, ColumnStyle, TransactionRecord};

/// Rupiah accounting number format.
const ACCOUNTING_FORMAT: &str =
    "_-\"Rp\"* #,##0.00_-;-\"Rp\"* #,##0.00_-;_-\"Rp\"* \"-\"??_-;_-@_-";

/// Thousands-grouped plain number.
const NUMBER_FORMAT: &str = "#,##0";

fn parse_color(hex: &str) -> Color {
    let trimmed = hex.trim_start_matches('#');
    match u32::from_str_radix(trimmed, 16) {
        Ok(rgb) => Color::RGB(rgb),
        Err(_) => Color::Black,
    }
}

fn align(style: &ColumnStyle) -> FormatAlign {
    match style.align {
        ColumnAlign::Left => FormatAlign::Left,
        ColumnAlign::Center => FormatAlign::Center,
        ColumnAlign::Right => FormatAlign::Right,
    }
}

fn header_format(style: &ColumnStyle) -> Format {
    Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter)
        .set_align(align(style))
        .set_border(FormatBorder::Thin)
        .set_background_color(parse_color(&style.bg_color))
        .set_font_color(parse_color(&style.font_color))
}

fn data_format(style: &ColumnStyle) -> Format {
    let format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::VerticalCenter)
        .set_align(align(style));
    match style.format {
        ColumnFormat::Accounting => format.set_num_format(ACCOUNTING_FORMAT),
        ColumnFormat::Number => format.set_num_format(NUMBER_FORMAT),
        ColumnFormat::Text => format,
    }
}

/// Write records to a styled sheet named `Data`. Returns the data row count.
pub fn write_styled_xlsx(
    records: &[TransactionRecord],
    path: &Path,
    config: &BankColumnConfig,
) -> Result<usize> {
    let columns = visible_columns(config);
    if columns.is_empty() {
        anyhow::bail!("no visible columns configured");
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data").context("name sheet")?;

    for (idx, (column, style)) in columns.iter().enumerate() {
        let col = idx as u16;
        worksheet
            .write_string_with_format(0, col, &style.resolved_label(column.key), &header_format(style))
            .context("write header")?;
        worksheet.set_column_width(col, style.width).context("set column width")?;

        let format = data_format(style);
        for (row_idx, record) in records.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            match column.kind {
                ColumnValue::Text => worksheet
                    .write_string_with_format(row, col, column.text_value(record), &format)
                    .context("write cell")?,
                ColumnValue::Number => worksheet
                    .write_number_with_format(row, col, column.number_value(record), &format)
                    .context("write cell")?,
            };
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    Ok(records.len())
}

/// Unstyled fallback: same columns and labels, no formats or widths.
pub fn write_plain_xlsx(
    records: &[TransactionRecord],
    path: &Path,
    config: &BankColumnConfig,
) -> Result<usize> {
    let columns = visible_columns(config);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Data").context("name sheet")?;

    for (idx, (column, style)) in columns.iter().enumerate() {
        let col = idx as u16;
        worksheet
            .write_string(0, col, &style.resolved_label(column.key))
            .context("write header")?;
        for (row_idx, record) in records.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            match column.kind {
                ColumnValue::Text => worksheet
                    .write_string(row, col, column.text_value(record))
                    .context("write cell")?,
                ColumnValue::Number => worksheet
                    .write_number(row, col, column.number_value(record))
                    .context("write cell")?,
            };
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    Ok(records.len())
}
