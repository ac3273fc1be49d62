//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::layout::layout_text;
use super::{DocumentSource, Result};
use crate::error::DocumentError;
use crate::ratesheet::rules::is_header_line;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Text with the rate table as pipe rows.
    ///
    /// A table drawn with vector borders is rebuilt from text positions; when
    /// no header row comes out of that, the plain pdf-extract text is used.
    fn extract_text(&self) -> Result<String> {
        let Some(doc) = &self.document else {
            return Err(DocumentError::Parse("No document loaded".to_string()));
        };

        match layout_text(doc) {
            Ok(layout) if layout.lines().any(is_header_line) => {
                debug!("Rate table rebuilt from PDF layout");
                return Ok(layout);
            }
            Ok(_) => debug!("No table header in PDF layout, using plain text"),
            Err(e) => debug!("PDF layout unavailable ({}), using plain text", e),
        }

        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))
    }
}
