//! Domain types for representing an extracted resume document.

use std::path::PathBuf;

/// Separator placed between fragments in the flattened text.
pub const FRAGMENT_SEPARATOR: &str = "\n";

/// A document with its extracted text, one fragment per page or paragraph.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename (without path).
    pub filename: String,

    /// Format of the source file.
    pub format: DocumentFormat,

    /// Fragments in document order.
    pub fragments: Vec<Fragment>,
}

impl ExtractedDocument {
    /// Create an empty document with the given filename and format.
    pub fn new(filename: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            fragments: Vec::new(),
        }
    }

    /// Append the next fragment. Numbering follows insertion order.
    pub fn push_fragment(&mut self, text: impl Into<String>) {
        let number = self.fragments.len() + 1;
        self.fragments.push(Fragment::new(number, text));
    }

    /// Number of fragments (pages or paragraphs).
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// All fragments joined by newlines. Empty fragments are kept as empty
    /// segments, so the segment count always equals the fragment count.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR)
    }
}

/// The format of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
}

impl DocumentFormat {
    /// Formats in selection priority order.
    pub const PRIORITY: [DocumentFormat; 2] = [DocumentFormat::Pdf, DocumentFormat::Docx];

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect format from the text after the last dot of a file name.
    ///
    /// Unlike `Path::extension`, a bare `.pdf` counts as a PDF.
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }

    /// What one fragment of this format is called.
    pub fn fragment_kind(&self) -> &'static str {
        match self {
            Self::Pdf => "page",
            Self::Docx => "paragraph",
        }
    }
}

/// One page's or one paragraph's text, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// 1-based position in the document.
    pub number: usize,

    /// Plain text content.
    pub text: String,
}

impl Fragment {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A candidate file selected from the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// File name without directory, for display and logging.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
