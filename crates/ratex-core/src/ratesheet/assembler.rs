//! Turns extracted rows and metadata into flat output records.

use super::rules::format_for_identifier;
use crate::models::rate::{OutputIdentifier, OutputRecord, RateRow, ShipmentMetadata};

/// Builds output records for one airline.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    airline: String,
}

impl RecordAssembler {
    /// The airline name is used as given.
    pub fn new(airline: impl Into<String>) -> Self {
        Self {
            airline: airline.into(),
        }
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    /// One record per row. Weight breaks above 100 kg are always empty.
    pub fn record(&self, row: &RateRow, metadata: &ShipmentMetadata) -> OutputRecord {
        OutputRecord {
            airline: self.airline.clone(),
            origin: row.origin.clone(),
            destination: row.destination.clone(),
            commodity: metadata.commodity.clone(),
            min_charge: row.min_charge,
            under_45: row.under_45,
            over_45: row.over_45,
            over_100: row.over_100,
            over_300: None,
            over_500: None,
            over_1000: None,
            currency: metadata.currency.clone(),
            valid_from: metadata.valid_from.clone(),
            valid_until: metadata.valid_until.clone(),
            notes: String::new(),
        }
    }

    /// `{airline}_{DDMMYY}-{DDMMYY}` built from the validity window.
    pub fn identifier(&self, metadata: &ShipmentMetadata) -> OutputIdentifier {
        OutputIdentifier::new(
            &self.airline,
            &format_for_identifier(&metadata.valid_from),
            &format_for_identifier(&metadata.valid_until),
        )
    }

    pub fn assemble(
        &self,
        rows: &[RateRow],
        metadata: &ShipmentMetadata,
    ) -> (Vec<OutputRecord>, OutputIdentifier) {
        let records = rows.iter().map(|row| self.record(row, metadata)).collect();
        (records, self.identifier(metadata))
    }
}

/// Build the output records and identifier for `airline`.
pub fn assemble(
    rows: &[RateRow],
    metadata: &ShipmentMetadata,
    airline: &str,
) -> (Vec<OutputRecord>, OutputIdentifier) {
    RecordAssembler::new(airline).assemble(rows, metadata)
}
