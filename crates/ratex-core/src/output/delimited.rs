//! CSV and JSON output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::{Result, TableWriter};
use crate::models::rate::{OutputRecord, COLUMNS};

/// Writes records as CSV with the fixed column header.
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn write(&self, records: &[OutputRecord], path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record(COLUMNS)?;
        for record in records {
            wtr.write_record(record.cells().iter().map(|cell| cell.to_string()))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Writes records as a pretty-printed JSON array.
pub struct JsonWriter;

impl TableWriter for JsonWriter {
    fn write(&self, records: &[OutputRecord], path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, records)?;
        Ok(())
    }
}
