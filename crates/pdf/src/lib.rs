//! PDF parser backend for resume text extraction.
//!
//! Text is extracted page by page; encrypted documents are rejected.

pub mod parser;

pub use parser::PdfParser;
