//! User-editable export configuration, persisted as JSON in the home
//! directory. The parsing core never reads this; only the export layer does.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Horizontal alignment for a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// Number rendering for a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    /// Values written as-is
    Text,
    /// Rupiah accounting format
    Accounting,
    /// Thousands-grouped number
    Number,
}

/// Style for one exported column. Absent fields take these defaults, so a
/// user config may specify only the fields it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnStyle {
    pub visible: bool,
    /// Header label; defaults to the upper-cased internal column key
    pub label: Option<String>,
    pub bg_color: String,
    pub font_color: String,
    pub align: ColumnAlign,
    pub format: ColumnFormat,
    pub width: f64,
}

impl Default for ColumnStyle {
    fn default() -> Self {
        Self {
            visible: true,
            label: None,
            bg_color: "#D7E4BC".to_string(),
            font_color: "#000000".to_string(),
            align: ColumnAlign::Center,
            format: ColumnFormat::Text,
            width: 20.0,
        }
    }
}

impl ColumnStyle {
    /// Header label for the given internal column key.
    pub fn resolved_label(&self, key: &str) -> String {
        self.label.clone().unwrap_or_else(|| key.to_uppercase())
    }
}

/// Column styles for one bank, keyed by internal column name.
pub type BankColumnConfig = HashMap<String, ColumnStyle>;

/// Persisted application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-bank export column configuration, keyed by bank label
    pub bank_configs: HashMap<String, BankColumnConfig>,
}

impl Settings {
    /// Column configuration for a bank; empty (all defaults) when unset.
    pub fn column_config(&self, bank: &str) -> BankColumnConfig {
        self.bank_configs.get(bank).cloned().unwrap_or_default()
    }

    /// Load settings from disk. A missing or unreadable file yields the
    /// defaults rather than an error so a broken config never blocks an
    /// extraction run.
    pub fn load() -> Self {
        let Ok(path) = settings_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = settings_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serialize settings")?;
        fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

/// `~/.mutasi/settings.json`
pub fn settings_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".mutasi").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_absent_fields() {
        let style: ColumnStyle = serde_json::from_str(r#"{"visible": false}"#).unwrap();
        assert!(!style.visible);
        assert_eq!(style.bg_color, "#D7E4BC");
        assert_eq!(style.width, 20.0);
        assert_eq!(style.format, ColumnFormat::Text);
        assert_eq!(style.resolved_label("debit"), "DEBIT");
    }

    #[test]
    fn test_label_override() {
        let style: ColumnStyle =
            serde_json::from_str(r#"{"label": "Tanggal", "format": "accounting"}"#).unwrap();
        assert_eq!(style.resolved_label("posting_date"), "Tanggal");
        assert_eq!(style.format, ColumnFormat::Accounting);
    }

    #[test]
    fn test_unknown_bank_yields_empty_config() {
        let settings = Settings::default();
        assert!(settings.column_config("BNI").is_empty());
    }

    #[test]
    fn test_settings_parse_nested_bank_config() {
        let raw = r#"{
            "bank_configs": {
                "Mandiri": {
                    "debit": {"visible": false},
                    "balance": {"format": "number", "width": 28}
                }
            }
        }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        let config = settings.column_config("Mandiri");
        assert!(!config["debit"].visible);
        assert_eq!(config["balance"].format, ColumnFormat::Number);
        assert_eq!(config["balance"].width, 28.0);
    }
}
