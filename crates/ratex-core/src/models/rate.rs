//! Rate sheet data models: extracted rows, shipment metadata and the flat
//! output record handed to the spreadsheet writers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default currency when the rate sheet does not state one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Default commodity when the rate sheet does not state one.
pub const DEFAULT_COMMODITY: &str = "General Cargo";

/// Default airline name used by the driver.
pub const DEFAULT_AIRLINE: &str = "Turkish";

/// Fixed output column order. Downstream consumers depend on it.
pub const COLUMNS: [&str; 15] = [
    "Airline",
    "Origin",
    "Destination",
    "Commodity",
    "Min",
    "<45",
    ">45",
    ">100",
    ">300",
    ">500",
    ">1000",
    "Currency",
    "Valid from",
    "Valid until",
    "Notes",
];

/// One parsed line of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRow {
    /// Origin airport or city.
    pub origin: String,
    /// Destination airport or city.
    pub destination: String,
    /// Minimum charge.
    pub min_charge: Decimal,
    /// Rate per kg below 45 kg.
    pub under_45: Decimal,
    /// Rate per kg above 45 kg.
    pub over_45: Decimal,
    /// Rate per kg above 100 kg, when the table has that column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_100: Option<Decimal>,
}

/// Commercial metadata for a rate sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentMetadata {
    pub currency: String,

    /// First date found in the text (DD/MM/YYYY), or empty.
    pub valid_from: String,

    /// Second date found in the text (DD/MM/YYYY), or empty.
    pub valid_until: String,

    pub commodity: String,
}

impl Default for ShipmentMetadata {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            valid_from: String::new(),
            valid_until: String::new(),
            commodity: DEFAULT_COMMODITY.to_string(),
        }
    }
}

impl ShipmentMetadata {
    /// Whether a validity window was found.
    pub fn has_validity(&self) -> bool {
        !self.valid_from.is_empty() && !self.valid_until.is_empty()
    }

    /// Parse the validity window into calendar dates.
    ///
    /// Returns `None` unless both strings are real DD/MM/YYYY dates. The
    /// stored strings are never rewritten.
    pub fn validity_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = NaiveDate::parse_from_str(&self.valid_from, "%d/%m/%Y").ok()?;
        let until = NaiveDate::parse_from_str(&self.valid_until, "%d/%m/%Y").ok()?;
        Some((from, until))
    }
}

/// A single spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Airline")]
    pub airline: String,

    #[serde(rename = "Origin")]
    pub origin: String,

    #[serde(rename = "Destination")]
    pub destination: String,

    #[serde(rename = "Commodity")]
    pub commodity: String,

    #[serde(rename = "Min", with = "rust_decimal::serde::float")]
    pub min_charge: Decimal,

    #[serde(rename = "<45", with = "rust_decimal::serde::float")]
    pub under_45: Decimal,

    #[serde(rename = ">45", with = "rust_decimal::serde::float")]
    pub over_45: Decimal,

    #[serde(rename = ">100", default, with = "rust_decimal::serde::float_option")]
    pub over_100: Option<Decimal>,

    /// Not present in the source format; always empty.
    #[serde(rename = ">300", default, with = "rust_decimal::serde::float_option")]
    pub over_300: Option<Decimal>,

    /// Not present in the source format; always empty.
    #[serde(rename = ">500", default, with = "rust_decimal::serde::float_option")]
    pub over_500: Option<Decimal>,

    /// Not present in the source format; always empty.
    #[serde(rename = ">1000", default, with = "rust_decimal::serde::float_option")]
    pub over_1000: Option<Decimal>,

    #[serde(rename = "Currency")]
    pub currency: String,

    #[serde(rename = "Valid from")]
    pub valid_from: String,

    #[serde(rename = "Valid until")]
    pub valid_until: String,

    #[serde(rename = "Notes")]
    pub notes: String,
}

/// A cell value in column order, as the writers see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(Decimal),
    Empty,
}

impl Cell<'_> {
    fn number(value: Option<Decimal>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

impl OutputRecord {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [Cell<'_>; 15] {
        [
            Cell::Text(&self.airline),
            Cell::Text(&self.origin),
            Cell::Text(&self.destination),
            Cell::Text(&self.commodity),
            Cell::Number(self.min_charge),
            Cell::Number(self.under_45),
            Cell::Number(self.over_45),
            Cell::number(self.over_100),
            Cell::number(self.over_300),
            Cell::number(self.over_500),
            Cell::number(self.over_1000),
            Cell::Text(&self.currency),
            Cell::Text(&self.valid_from),
            Cell::Text(&self.valid_until),
            Cell::Text(&self.notes),
        ]
    }
}

/// Name of the persisted output, e.g. `Turkish_010224-280224`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputIdentifier(String);

impl OutputIdentifier {
    /// Build from an airline name and two already-normalized date tokens.
    pub fn new(airline: &str, from_token: &str, until_token: &str) -> Self {
        Self(format!("{}_{}-{}", airline, from_token, until_token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same name with `_{suffix}` appended.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}_{}", self.0, suffix))
    }

    /// File name with the given extension appended.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for OutputIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
