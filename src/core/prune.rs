//! Age-based file cleanup.
//!
//! Removes stale regular files from a directory, non-recursively. Used by
//! the bootstrap to keep the log directory from accumulating unbounded.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::error::{Error, Result};

const SECONDS_PER_DAY: u64 = 86_400;

/// Remove every regular file directly inside `dir` whose last-modified time
/// is more than `days` days in the past. Subdirectories are left alone, and
/// files that vanish between listing and removal are skipped. Returns the
/// number of files removed.
pub fn prune_older_than(dir: &Path, days: u64) -> Result<usize> {
    prune_with_now(dir, days, SystemTime::now())
}

fn prune_with_now(dir: &Path, days: u64, now: SystemTime) -> Result<usize> {
    let Some(cutoff) = now.checked_sub(Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)))
    else {
        // Cutoff predates the epoch; nothing can be older.
        return Ok(0);
    };

    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(
            format!("Failed to list {}: {}", dir.display(), e),
            Some("prune directory".to_string()),
        )
    })?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some("prune directory".to_string()))
        })?;
        let path = entry.path();

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(Error::internal_io(
                    format!("Failed to stat {}: {}", path.display(), e),
                    Some("prune directory".to_string()),
                ))
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(|e| {
            Error::internal_io(
                format!("Failed to read mtime of {}: {}", path.display(), e),
                Some("prune directory".to_string()),
            )
        })?;

        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(Error::internal_io(
                        format!("Failed to remove {}: {}", path.display(), e),
                        Some("prune directory".to_string()),
                    ))
                }
            }
        }
    }

    Ok(removed)
}
