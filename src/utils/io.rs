//! File I/O primitives with consistent error handling.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a local file, if it exists.
///
/// Returns `Ok(None)` when the file is missing, otherwise the trimmed
/// contents.
pub fn read_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.trim().to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::internal_io(
            format!("Failed to read {}: {}", path.display(), e),
            Some("read file".to_string()),
        )),
    }
}

/// Write a string to a local file, truncating any previous contents.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        Error::internal_io(
            format!("Failed to write {}: {}", path.display(), e),
            Some("write file".to_string()),
        )
    })
}

/// Remove a local file. Already-missing files are not an error.
pub fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::internal_io(
            format!("Failed to remove {}: {}", path.display(), e),
            Some("remove file".to_string()),
        )),
    }
}

/// Remove a local folder and all of its contents. Already-missing folders
/// are not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_dir_all(path).map_err(|e| {
        Error::internal_io(
            format!("Failed to remove {}: {}", path.display(), e),
            Some("remove folder".to_string()),
        )
    })
}

/// Require a path to exist, failing with the caller-supplied message when it
/// does not.
pub fn require_exists(path: &Path, msg_if_missing: &str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::file_not_found(
            path.display().to_string(),
            msg_if_missing,
        ))
    }
}
