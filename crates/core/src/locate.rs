//! Discovery of the resume file inside the input directory.
//!
//! Selection is by extension priority: the first PDF wins, and a DOCX is only
//! chosen when the directory holds no PDF at all. Names are sorted before
//! selection so the result does not depend on filesystem enumeration order.

use crate::types::{DocumentFormat, SourceFile};
use crate::Result;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Find the resume file in `dir`.
///
/// Returns `Ok(None)` when the directory holds no `.pdf` or `.docx` file.
/// A missing or unreadable directory is an error.
pub fn find_candidate(dir: &Path) -> Result<Option<SourceFile>> {
    let mut names: Vec<OsString> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, so a link to a regular file still counts.
        if !entry.path().is_file() {
            log::debug!("Skipping non-file entry {:?}", entry.file_name());
            continue;
        }
        names.push(entry.file_name());
    }

    names.sort();
    log::debug!("Scanned {} file(s) in {}", names.len(), dir.display());

    let display_names: Vec<String> = names
        .iter()
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    Ok(select_candidate(&display_names)
        .map(|(idx, format)| SourceFile::new(dir.join(&names[idx]), format)))
}

/// Pick the index of the first name matching the highest-priority format.
///
/// `names` is taken in the order given; callers sort it first.
pub fn select_candidate(names: &[String]) -> Option<(usize, DocumentFormat)> {
    DocumentFormat::PRIORITY.iter().find_map(|&format| {
        names
            .iter()
            .position(|name| DocumentFormat::from_file_name(name) == Some(format))
            .map(|idx| (idx, format))
    })
}
