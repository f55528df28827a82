//! Core domain types, file discovery, and output writing for resume text
//! extraction.

pub mod error;
pub mod locate;
pub mod output;
pub mod types;

pub use error::{Error, Result};
pub use locate::find_candidate;
pub use output::write_text;
pub use types::{DocumentFormat, ExtractedDocument, Fragment, SourceFile, FRAGMENT_SEPARATOR};
