//! Error types for resume text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, extracting, or writing resume text.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input directory or file, or to write the output.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The PDF could not be loaded (not a PDF, or corrupted).
    #[error("PDF parsing error: {0}")]
    PdfParseError(String),

    /// The PDF is encrypted and cannot be opened with an empty password.
    #[error("Encrypted document: {0}")]
    Encrypted(String),

    /// ZIP archive error (for DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for DOCX).
    #[error("XML parsing error: {0}")]
    XmlError(String),
}
