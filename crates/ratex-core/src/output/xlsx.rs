//! XLSX output using rust_xlsxwriter.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use super::{Result, TableWriter};
use crate::models::rate::{Cell, OutputRecord, COLUMNS};

/// Writes records to a single-sheet workbook.
pub struct XlsxWriter {
    sheet_name: String,
}

impl XlsxWriter {
    pub fn new() -> Self {
        Self {
            sheet_name: "Rates".to_string(),
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for XlsxWriter {
    fn write(&self, records: &[OutputRecord], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, cell) in record.cells().iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row, col, *s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row, col, n.to_f64().unwrap_or_default())?;
                    }
                    Cell::Empty => {}
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
