//! Core library for freight rate sheet extraction.
//!
//! This crate provides:
//! - Document-to-text conversion (markdown/text passthrough, PDF text)
//! - Rate sheet extraction (validity window, rate table rows)
//! - Record assembly and output naming
//! - Spreadsheet output (xlsx, csv, json)

pub mod document;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod ratesheet;

pub use document::{document_to_text, DocumentKind, DocumentSource};
#[cfg(feature = "pdf")]
pub use document::PdfExtractor;
pub use error::{DocumentError, RatexError, Result, WriteError};
pub use models::config::RatexConfig;
pub use models::rate::{OutputIdentifier, OutputRecord, RateRow, ShipmentMetadata, COLUMNS};
pub use output::{output_path, write_table, OutputFormat, TableWriter};
pub use pipeline::{convert_document, extract_document, write_sheet};
pub use ratesheet::{
    assemble, extract_metadata, extract_table_data, format_for_identifier, RateSheet,
    RateSheetParser,
};
