//! PDF file parser implementation.

use cv_core::{DocumentFormat, Error, ExtractedDocument, Result};
use lopdf::Document;
use std::io::Read;

/// Parser for PDF files.
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PDF from a reader, producing one fragment per page.
    ///
    /// A page whose text cannot be extracted still yields a fragment, left
    /// empty, so the fragment count always equals the page count.
    ///
    /// Encrypted documents are opened with an empty user password, which
    /// covers files restricted only by an owner password. Anything else
    /// fails with `Error::Encrypted`.
    pub fn parse<R: Read>(&self, reader: R, filename: &str) -> Result<ExtractedDocument> {
        let mut document = Document::load_from(reader)
            .map_err(|e| Error::PdfParseError(format!("Failed to load PDF: {}", e)))?;

        if document.is_encrypted() {
            document.decrypt("").map_err(|e| {
                Error::Encrypted(format!("{} requires a password: {}", filename, e))
            })?;
            log::debug!("Decrypted {} with an empty user password", filename);
        }

        let pages = document.get_pages();
        log::debug!("PDF has {} pages", pages.len());

        let mut extracted = ExtractedDocument::new(filename, DocumentFormat::Pdf);
        for &page_number in pages.keys() {
            extracted.push_fragment(self.extract_page(&document, page_number));
        }

        Ok(extracted)
    }

    /// Extract the text of a single page, or an empty string if it has none.
    fn extract_page(&self, document: &Document, page_number: u32) -> String {
        match document.extract_text(&[page_number]) {
            Ok(text) => trim_line_endings(&text).to_string(),
            Err(e) => {
                log::warn!("No text extracted from page {}: {}", page_number, e);
                String::new()
            }
        }
    }
}

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the line terminators the backend appends after each text line.
fn trim_line_endings(text: &str) -> &str {
    text.trim_end_matches(&['\n', '\r'][..])
}
