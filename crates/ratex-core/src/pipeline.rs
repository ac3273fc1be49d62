//! End-to-end conversion: document text, extraction, spreadsheet.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::document_to_text;
use crate::error::{DocumentError, Result};
use crate::models::config::RatexConfig;
use crate::output::{output_path, write_table, OutputFormat, TableWriter, XlsxWriter};
use crate::ratesheet::{RateSheet, RateSheetParser};

/// Read a document and extract its rate sheet for `airline`.
pub fn extract_document(input: &Path, airline: &str, config: &RatexConfig) -> Result<RateSheet> {
    let text = document_to_text(input)?;

    let min = config.document.min_text_length;
    let length = text.trim().len();
    if min > 0 && length < min {
        return Err(DocumentError::TooShort { length, min }.into());
    }

    Ok(RateSheetParser::from_config(&config.extraction).parse(&text, airline))
}

/// Persist the records of `sheet` in `output_dir`, returning the path written.
///
/// The directory is created if missing. An existing file is overwritten.
pub fn write_sheet(
    sheet: &RateSheet,
    output_dir: &Path,
    format: OutputFormat,
    config: &RatexConfig,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_path(output_dir, &sheet.identifier, format);

    match format {
        OutputFormat::Xlsx => XlsxWriter::new()
            .with_sheet_name(&config.output.sheet_name)
            .write(&sheet.records, &path)?,
        other => write_table(&sheet.records, &path, other)?,
    }

    debug!("Wrote {} record(s) to {}", sheet.records.len(), path.display());
    Ok(path)
}

/// Convert a document into a spreadsheet in `output_dir`.
pub fn convert_document(
    input: &Path,
    airline: &str,
    output_dir: &Path,
    format: OutputFormat,
    config: &RatexConfig,
) -> Result<(RateSheet, PathBuf)> {
    let sheet = extract_document(input, airline, config)?;
    let path = write_sheet(&sheet, output_dir, format, config)?;
    Ok((sheet, path))
}
