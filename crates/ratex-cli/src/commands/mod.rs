//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod convert;

use std::path::PathBuf;

use ratex_core::models::config::RatexConfig;
use ratex_core::OutputFormat;

/// Output format argument.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// Excel workbook
    Xlsx,
    /// CSV file
    Csv,
    /// JSON array
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ratex")
        .join("config.json")
}

/// Config file to use: the explicit path, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RatexConfig> {
    let path = config_file(config_path);
    if config_path.is_some() || path.exists() {
        Ok(RatexConfig::from_file(&path)?)
    } else {
        Ok(RatexConfig::default())
    }
}
