//! Writing extracted text to disk.

use crate::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write `text` as UTF-8 to `path`, replacing any previous content.
///
/// Missing parent directories are created first.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    log::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("nested").join("cv.txt");

        write_text(&path, "Name: Jane").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Name: Jane");
    }

    #[test]
    fn test_overwrites_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cv.txt");

        write_text(&path, "a much longer first version").unwrap();
        write_text(&path, "short").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_writes_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cv.txt");

        write_text(&path, "Zoë Müller – Ingénieure").unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes, "Zoë Müller – Ingénieure".as_bytes());
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let result = write_text(&blocker.join("cv.txt"), "text");
        assert!(matches!(result, Err(crate::Error::IoError(_))));
    }
}
