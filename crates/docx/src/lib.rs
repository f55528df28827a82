//! DOCX (Office Open XML) parser backend for resume text extraction.
//!
//! Parses .docx files which are ZIP archives containing XML documents.

pub mod parser;

pub use parser::DocxParser;
