//! Document reading and writing
//!
//! Documents are UTF-8 text. Writes go to a sibling temporary file first and
//! are then renamed over the target, so a failed save never truncates the
//! previous version.

use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of the temporary file used during a write
const TEMP_SUFFIX: &str = ".inkpad-tmp";

/// Read a document as UTF-8 text.
///
/// # Errors
///
/// Returns `Error::FileRead` carrying the path if the file is missing,
/// unreadable or not valid UTF-8.
pub fn read_file(path: &Path) -> Result<String> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document, replacing any existing file.
///
/// # Errors
///
/// Returns `Error::FileWrite` carrying the path of the file that failed.
pub fn write_file(path: &Path, text: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    fs::write(&temp_path, text).map_err(|source| Error::FileWrite {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| {
        // Best effort; the original error is what matters
        let _ = fs::remove_file(&temp_path);
        Error::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("Saved {} ({} bytes)", path.display(), text.len());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");

        write_file(&path, "# Hei på deg\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "# Hei på deg\n");
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "old contents that are longer").unwrap();

        write_file(&path, "new").unwrap();
        assert_eq!(read_file(&path).unwrap(), "new");
    }

    #[test]
    fn test_read_missing_file_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, Error::FileRead { path: ref p, .. } if p == &path));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no").join("such").join("dir.md");
        assert!(matches!(
            write_file(&path, "x"),
            Err(Error::FileWrite { .. })
        ));
    }
}
