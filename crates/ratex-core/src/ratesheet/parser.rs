//! One-call rate sheet parser: metadata, table rows and record assembly.

use tracing::{debug, info, warn};

use super::assembler::RecordAssembler;
use super::metadata::MetadataExtractor;
use super::table::{SkippedRow, TableExtractor};
use crate::models::config::ExtractionConfig;
use crate::models::rate::{OutputIdentifier, OutputRecord, ShipmentMetadata};

/// Everything extracted from one rate sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSheet {
    /// Commercial metadata.
    pub metadata: ShipmentMetadata,
    /// One record per valid table row, in source order.
    pub records: Vec<OutputRecord>,
    /// Name for the persisted output.
    pub identifier: OutputIdentifier,
    /// Candidate rows that were dropped.
    pub skipped: Vec<SkippedRow>,
}

impl RateSheet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Rate sheet parser combining the metadata and table extractors.
#[derive(Debug, Clone, Default)]
pub struct RateSheetParser {
    metadata: MetadataExtractor,
    table: TableExtractor,
}

impl RateSheetParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_currency(&config.default_currency)
            .with_commodity(&config.default_commodity)
            .with_min_cells(config.min_cells)
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_currency(currency);
        self
    }

    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_commodity(commodity);
        self
    }

    pub fn with_min_cells(mut self, min_cells: usize) -> Self {
        self.table = self.table.with_min_cells(min_cells);
        self
    }

    /// Parse rate sheet text into records for `airline`.
    pub fn parse(&self, text: &str, airline: &str) -> RateSheet {
        let metadata = self.metadata.extract(text);
        let table = self.table.extract_with_report(text);

        if let Some((from, until)) = metadata.validity_dates() {
            if until < from {
                warn!(
                    "Validity window ends before it starts: {} - {}",
                    metadata.valid_from, metadata.valid_until
                );
            }
        } else if !metadata.has_validity() {
            debug!("No validity window found");
        }

        if !table.header_found {
            warn!("No rate table header (Origin/Destination) found");
        } else if table.rows.is_empty() {
            warn!("Rate table has no valid rows");
        }

        let assembler = RecordAssembler::new(airline);
        let (records, identifier) = assembler.assemble(&table.rows, &metadata);

        info!(
            "Extracted {} record(s) for {}, {} row(s) skipped",
            records.len(),
            identifier,
            table.skipped.len()
        );

        RateSheet {
            metadata,
            records,
            identifier,
            skipped: table.skipped,
        }
    }
}
