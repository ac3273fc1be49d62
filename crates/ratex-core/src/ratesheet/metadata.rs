//! Shipment metadata extraction.

use tracing::debug;

use super::rules::{DateExtractor, FieldExtractor};
use crate::models::rate::{ShipmentMetadata, DEFAULT_COMMODITY, DEFAULT_CURRENCY};

/// Extracts the validity window and fills in commercial defaults.
///
/// Currency and commodity are not read from the text; they are whatever
/// the extractor was configured with.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    currency: String,
    commodity: String,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            commodity: DEFAULT_COMMODITY.to_string(),
        }
    }

    /// Set the currency written on every record.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the commodity written on every record.
    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = commodity.into();
        self
    }

    pub fn extract(&self, text: &str) -> ShipmentMetadata {
        let mut metadata = ShipmentMetadata {
            currency: self.currency.clone(),
            commodity: self.commodity.clone(),
            ..Default::default()
        };

        let dates = DateExtractor::new().extract_all(text);
        debug!("Found {} date(s) in text", dates.len());

        // Need a pair; a lone date is not a window
        if let [from, until, ..] = dates.as_slice() {
            debug!(
                "Validity window {} at {:?}, {} at {:?}",
                from.value, from.position, until.value, until.position
            );
            metadata.valid_from = from.value.clone();
            metadata.valid_until = until.value.clone();
        }

        metadata
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract metadata with the default currency and commodity.
pub fn extract_metadata(text: &str) -> ShipmentMetadata {
    MetadataExtractor::new().extract(text)
}
