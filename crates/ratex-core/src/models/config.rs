//! Configuration structures for the conversion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::rate::{DEFAULT_AIRLINE, DEFAULT_COMMODITY, DEFAULT_CURRENCY};
use crate::error::{RatexError, Result};
use crate::output::OutputFormat;

/// Characters Excel does not allow in a worksheet name.
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Main configuration for the ratex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatexConfig {
    /// Rate sheet extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Document conversion configuration.
    pub document: DocumentConfig,
}

/// Rate sheet extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency written on every record.
    pub default_currency: String,

    /// Commodity written on every record.
    pub default_commodity: String,

    /// Minimum number of cells for a candidate table row.
    pub min_cells: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_commodity: DEFAULT_COMMODITY.to_string(),
            min_cells: 4,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Airline name used when none is given on the command line.
    pub default_airline: String,

    /// Directory the spreadsheet is written to.
    pub output_dir: PathBuf,

    /// Spreadsheet format.
    pub format: OutputFormat,

    /// Worksheet name for xlsx output.
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_airline: DEFAULT_AIRLINE.to_string(),
            output_dir: PathBuf::from("."),
            format: OutputFormat::Xlsx,
            sheet_name: "Rates".to_string(),
        }
    }
}

/// Document conversion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Minimum converted text length accepted by the driver (0 = no check).
    pub min_text_length: usize,
}

impl RatexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.min_cells < 4 {
            return Err(RatexError::Config(format!(
                "extraction.min_cells must be at least 4, got {}",
                self.extraction.min_cells
            )));
        }

        let sheet = &self.output.sheet_name;
        if sheet.is_empty() || sheet.chars().count() > 31 || sheet.contains(INVALID_SHEET_CHARS) {
            return Err(RatexError::Config(format!(
                "output.sheet_name {:?} is not a valid worksheet name",
                sheet
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: RatexConfig =
            serde_json::from_str(r#"{"output": {"default_airline": "Lufthansa"}}"#).unwrap();

        assert_eq!(config.output.default_airline, "Lufthansa");
        assert_eq!(config.output.format, OutputFormat::Xlsx);
        assert_eq!(config.extraction.default_currency, "EUR");
        assert_eq!(config.extraction.min_cells, 4);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RatexConfig::default();
        config.output.format = OutputFormat::Csv;
        config.save(&path).unwrap();

        let loaded = RatexConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Csv);
        assert_eq!(loaded.output.sheet_name, "Rates");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(RatexConfig::from_file(&path), Err(RatexError::Json(_))));
        assert!(matches!(
            RatexConfig::from_file(&dir.path().join("missing.json")),
            Err(RatexError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"min_cells": 2}}"#).unwrap();
        assert!(matches!(RatexConfig::from_file(&path), Err(RatexError::Config(_))));

        let mut config = RatexConfig::default();
        config.output.sheet_name = "Rates/Feb".to_string();
        let err = config.save(&path).unwrap_err();
        assert!(matches!(err, RatexError::Config(ref msg) if msg.contains("sheet_name")));
    }
}
