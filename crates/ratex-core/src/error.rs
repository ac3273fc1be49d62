//! Error types for the ratex-core library.

use thiserror::Error;

/// Main error type for the ratex library.
#[derive(Error, Debug)]
pub enum RatexError {
    /// Document-to-text conversion error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Spreadsheet writing error.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a source document into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension is not one we can convert.
    #[error("unsupported document format: {0}")]
    Unsupported(String),

    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The converted text is shorter than the configured minimum.
    #[error("converted text too short ({length} chars, need {min})")]
    TooShort { length: usize, min: usize },

    /// Reading the source file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while persisting output records.
#[derive(Error, Debug)]
pub enum WriteError {
    /// XLSX workbook error.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer error.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the ratex library.
pub type Result<T> = std::result::Result<T, RatexError>;
