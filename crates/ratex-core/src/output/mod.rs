//! Spreadsheet output for assembled rate records.

mod delimited;
mod xlsx;

pub use delimited::{CsvWriter, JsonWriter};
pub use xlsx::XlsxWriter;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WriteError;
use crate::models::rate::{OutputIdentifier, OutputRecord};

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Persisted output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook.
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
    /// JSON array of objects keyed by column name.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Trait for writers that persist records as a table.
pub trait TableWriter {
    /// Create or overwrite `path` with a header row and one row per record.
    fn write(&self, records: &[OutputRecord], path: &Path) -> Result<()>;
}

/// Final output path: `dir/identifier.ext`.
pub fn output_path(dir: &Path, identifier: &OutputIdentifier, format: OutputFormat) -> PathBuf {
    dir.join(identifier.file_name(format.extension()))
}

/// Write `records` to `path` in the given format with default settings.
pub fn write_table(records: &[OutputRecord], path: &Path, format: OutputFormat) -> Result<()> {
    debug!("Writing {} record(s) as {} to {}", records.len(), format, path.display());
    match format {
        OutputFormat::Xlsx => XlsxWriter::new().write(records, path),
        OutputFormat::Csv => CsvWriter.write(records, path),
        OutputFormat::Json => JsonWriter.write(records, path),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;

    use crate::models::rate::OutputRecord;

    pub fn records() -> Vec<OutputRecord> {
        vec![
            OutputRecord {
                airline: "Turkish".to_string(),
                origin: "FRA".to_string(),
                destination: "IST".to_string(),
                commodity: "General Cargo".to_string(),
                min_charge: Decimal::new(1050, 2),
                under_45: Decimal::new(520, 2),
                over_45: Decimal::new(410, 2),
                over_100: None,
                over_300: None,
                over_500: None,
                over_1000: None,
                currency: "EUR".to_string(),
                valid_from: "01/02/2024".to_string(),
                valid_until: "28/02/2024".to_string(),
                notes: String::new(),
            },
            OutputRecord {
                airline: "Turkish".to_string(),
                origin: "MUC".to_string(),
                destination: "ESB".to_string(),
                commodity: "General Cargo".to_string(),
                min_charge: Decimal::new(12, 0),
                under_45: Decimal::new(6, 0),
                over_45: Decimal::new(5, 0),
                over_100: Some(Decimal::new(375, 2)),
                over_300: None,
                over_500: None,
                over_1000: None,
                currency: "EUR".to_string(),
                valid_from: "01/02/2024".to_string(),
                valid_until: "28/02/2024".to_string(),
                notes: String::new(),
            },
        ]
    }
}
