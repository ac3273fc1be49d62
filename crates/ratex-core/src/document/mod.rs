//! Document-to-text conversion.
//!
//! Rate sheets arrive either already rendered as markdown/plain text with
//! pipe tables, or as PDFs whose embedded text is extracted.

#[cfg(feature = "pdf")]
mod layout;
#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Kind of source document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markdown or plain text, used verbatim.
    Text,
    /// PDF with embedded text.
    Pdf,
}

impl DocumentKind {
    /// Extensions (lowercase) accepted as input.
    pub const EXTENSIONS: [&'static str; 4] = ["md", "markdown", "txt", "pdf"];

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "md" | "markdown" | "txt" => Ok(DocumentKind::Text),
            "pdf" => Ok(DocumentKind::Pdf),
            _ => Err(DocumentError::Unsupported(extension)),
        }
    }
}

/// Trait for document sources that can be rendered to text.
pub trait DocumentSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of pages in the loaded document.
    fn page_count(&self) -> u32;

    /// Extract text from the entire document.
    fn extract_text(&self) -> Result<String>;
}

/// Convert the document at `path` into text.
pub fn document_to_text(path: &Path) -> Result<String> {
    let kind = DocumentKind::from_path(path)?;
    let read_err = |source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    };

    let text = match kind {
        DocumentKind::Text => std::fs::read_to_string(path).map_err(read_err)?,
        DocumentKind::Pdf => {
            let data = std::fs::read(path).map_err(read_err)?;
            pdf_to_text(&data)?
        }
    };

    debug!("Converted {} ({:?}) to {} chars", path.display(), kind, text.len());
    Ok(text)
}

#[cfg(feature = "pdf")]
fn pdf_to_text(data: &[u8]) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    debug!("Extracting text from {} PDF page(s)", extractor.page_count());
    extractor.extract_text()
}

#[cfg(not(feature = "pdf"))]
fn pdf_to_text(_data: &[u8]) -> Result<String> {
    Err(DocumentError::Unsupported("pdf (built without the pdf feature)".to_string()))
}
