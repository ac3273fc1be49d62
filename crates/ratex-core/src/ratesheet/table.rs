//! Rate table extraction from pipe-delimited text.
//!
//! The text is scanned line by line. Nothing is read until a header row
//! naming both "Origin" and "Destination" is seen; every pipe-delimited line
//! after it is a candidate data row. Divider rows and blank lines are skipped
//! everywhere. Rows that do not parse are dropped and recorded as
//! [`SkippedRow`]s, extraction itself never fails.
//!
//! There is no way back to header-seeking: a second table in the same text
//! is read as more data rows of the first.

use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::rules::{is_header_line, parse_rate, SEPARATOR_LINE};
use crate::models::rate::RateRow;

/// Column labels used in skip reasons, indexed by cell position.
const CELL_LABELS: [&str; 6] = ["Origin", "Destination", "Min", "<45", ">45", ">100"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingHeader,
    InTable,
}

/// Why a candidate row was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer cells than the configured minimum.
    TooFewCells(usize),
    /// A required numeric cell is beyond the end of the row.
    MissingCell(usize),
    /// A numeric cell did not parse.
    InvalidNumber { column: &'static str, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewCells(n) => write!(f, "only {} cell(s)", n),
            SkipReason::MissingCell(i) => write!(f, "missing {} column", CELL_LABELS[*i]),
            SkipReason::InvalidNumber { column, value } => {
                write!(f, "invalid number in {} column: {:?}", column, value)
            }
        }
    }
}

/// A candidate row that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Line number in the source text (1-based).
    pub line_number: usize,
    /// The raw line.
    pub line: String,
    pub reason: SkipReason,
}

/// Rows read from a rate table plus the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableExtraction {
    /// Parsed rows, in source order.
    pub rows: Vec<RateRow>,
    /// Dropped candidate rows, in source order.
    pub skipped: Vec<SkippedRow>,
    /// Whether a header row was found at all.
    pub header_found: bool,
}

/// Line-oriented rate table reader.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    min_cells: usize,
}

impl TableExtractor {
    pub fn new() -> Self {
        Self { min_cells: 4 }
    }

    /// Set the minimum number of cells for a candidate row.
    pub fn with_min_cells(mut self, min_cells: usize) -> Self {
        self.min_cells = min_cells;
        self
    }

    /// Extract rows, keeping only the valid ones.
    pub fn extract(&self, text: &str) -> Vec<RateRow> {
        self.extract_with_report(text).rows
    }

    /// Extract rows and report every dropped candidate row.
    pub fn extract_with_report(&self, text: &str) -> TableExtraction {
        let mut result = TableExtraction::default();
        let mut state = ScanState::SeekingHeader;

        for (idx, line) in text.split('\n').enumerate() {
            if line.trim().is_empty() || !line.contains('|') {
                continue;
            }
            if SEPARATOR_LINE.is_match(line) {
                continue;
            }

            match state {
                ScanState::SeekingHeader => {
                    if is_header_line(line) {
                        debug!("Rate table header at line {}", idx + 1);
                        state = ScanState::InTable;
                        result.header_found = true;
                    }
                }
                ScanState::InTable => match self.parse_row(line) {
                    Ok(row) => result.rows.push(row),
                    Err(reason) => {
                        trace!("Skipping line {}: {}", idx + 1, reason);
                        result.skipped.push(SkippedRow {
                            line_number: idx + 1,
                            line: line.to_string(),
                            reason,
                        });
                    }
                },
            }
        }

        debug!(
            "Table extraction: {} rows, {} skipped",
            result.rows.len(),
            result.skipped.len()
        );
        result
    }

    fn parse_row(&self, line: &str) -> Result<RateRow, SkipReason> {
        // The first and last fragments sit outside the framing pipes
        let fragments: Vec<&str> = line.split('|').collect();
        let cells: Vec<&str> = fragments
            .get(1..fragments.len().saturating_sub(1))
            .unwrap_or_default()
            .iter()
            .map(|c| c.trim())
            .collect();

        if cells.len() < self.min_cells.max(2) {
            return Err(SkipReason::TooFewCells(cells.len()));
        }

        let number = |i: usize| -> Result<Decimal, SkipReason> {
            let value = cells.get(i).ok_or(SkipReason::MissingCell(i))?;
            parse_rate(value).ok_or_else(|| SkipReason::InvalidNumber {
                column: CELL_LABELS[i],
                value: value.to_string(),
            })
        };

        let min_charge = number(2)?;
        let under_45 = number(3)?;
        let over_45 = number(4)?;
        // Optional, but if the cell is there it has to be a number
        let over_100 = if cells.len() > 5 { Some(number(5)?) } else { None };

        Ok(RateRow {
            origin: cells[0].to_string(),
            destination: cells[1].to_string(),
            min_charge,
            under_45,
            over_45,
            over_100,
        })
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the valid rows of the first rate table in `text`.
pub fn extract_table_data(text: &str) -> Vec<RateRow> {
    TableExtractor::new().extract(text)
}
