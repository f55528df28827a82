//! Locate, extract, write: the run from input directory to output file.

use anyhow::{Context, Result};
use cv_core::{DocumentFormat, ExtractedDocument, SourceFile};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Directory scanned when none is given.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Output file written when none is given.
pub const DEFAULT_OUTPUT: &str = "data/cv.txt";

/// Where to read from and write to.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    /// Send the text to stdout instead of the output file.
    pub print: bool,
}

/// How a run ended, when it did not fail.
#[derive(Debug)]
pub enum Outcome {
    /// No `.pdf` or `.docx` in the input directory. Nothing was written.
    NotFound,
    /// The text was written to `output`.
    Written {
        source: SourceFile,
        output: PathBuf,
        fragments: usize,
    },
    /// The text was extracted for printing; nothing was written.
    Printed { text: String },
}

/// Run the whole pipeline once.
pub fn run(config: &Config) -> Result<Outcome> {
    let source = cv_core::find_candidate(&config.input_dir).with_context(|| {
        format!(
            "Failed to scan input directory {}",
            config.input_dir.display()
        )
    })?;

    let Some(source) = source else {
        log::debug!("No candidate file in {}", config.input_dir.display());
        return Ok(Outcome::NotFound);
    };

    log::debug!(
        "Selected {} ({:?})",
        source.path.display(),
        source.format
    );

    let document = extract(&source)?;
    log::debug!(
        "Extracted {} {}(s) from {}",
        document.fragment_count(),
        source.format.fragment_kind(),
        document.filename
    );

    let text = document.text();

    if config.print {
        return Ok(Outcome::Printed { text });
    }

    cv_core::write_text(&config.output, &text)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(Outcome::Written {
        source,
        output: config.output.clone(),
        fragments: document.fragment_count(),
    })
}

/// Extract a document with the backend for its format.
///
/// The file handle is owned by the parser call and closed when it returns.
pub fn extract(source: &SourceFile) -> Result<ExtractedDocument> {
    let file = File::open(&source.path)
        .with_context(|| format!("Failed to open {}", source.path.display()))?;
    let reader = BufReader::new(file);
    let filename = source.filename();

    let document = match source.format {
        DocumentFormat::Pdf => {
            log::debug!("Parsing as PDF");
            cv_pdf::PdfParser::new().parse(reader, &filename)
        }
        DocumentFormat::Docx => {
            log::debug!("Parsing as DOCX");
            cv_docx::DocxParser::new().parse(reader, &filename)
        }
    };

    document.with_context(|| format!("Failed to extract text from {}", source.path.display()))
}

/// Message shown when the input directory holds no resume.
pub fn not_found_message(input_dir: &Path) -> String {
    let dir = input_dir.display().to_string();
    format!(
        "No cv.pdf or cv.docx found in {}/. Please add your CV there.",
        dir.trim_end_matches('/')
    )
}

/// Message shown after the text was written.
pub fn success_message(output: &Path) -> String {
    format!("✅ CV text extracted to {}", output.display())
}
