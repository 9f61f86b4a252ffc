//! Runtime environment bootstrap.
//!
//! Prepares a fresh temp directory and a pruned log directory, installs the
//! process-wide logging handlers, and hands back a [`Workspace`] guard that
//! deletes the temp directory when dropped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::{logging, prune};
use crate::error::{Error, Result};

/// Log files older than this many days are removed at bootstrap.
pub const DEFAULT_PRUNE_DAYS: u64 = 30;

const DEFAULT_LOG_LEVEL: &str = "info";

/// One-shot environment setup. Configure with the builder methods, then call
/// [`Bootstrap::init`] exactly once per process.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    temp_dir: PathBuf,
    log_dir: PathBuf,
    log_name: Option<String>,
    log_level: String,
    prune_days: u64,
}

impl Bootstrap {
    pub fn new(temp_dir: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            log_dir: log_dir.into(),
            log_name: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            prune_days: DEFAULT_PRUNE_DAYS,
        }
    }

    /// Explicit log file name. An empty name keeps the timestamped default.
    pub fn log_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.log_name = Some(name);
        }
        self
    }

    /// Minimum severity name, case-insensitive (`trace` through `error`).
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn prune_days(mut self, days: u64) -> Self {
        self.prune_days = days;
        self
    }

    /// Prepare directories, prune old logs, and install logging. Returns the
    /// workspace guard; dropping it removes the temp directory.
    pub fn init(self) -> Result<Workspace> {
        let level = logging::parse_level(&self.log_level)?;
        let workspace = self.prepare()?;
        logging::init(workspace.log_file(), level)?;
        Ok(workspace)
    }

    /// Directory work only: recreate the temp dir empty, ensure the log dir,
    /// prune it, and resolve the log file path. No logging side effects.
    fn prepare(&self) -> Result<Workspace> {
        if self.temp_dir.exists() {
            fs::remove_dir_all(&self.temp_dir).map_err(|e| {
                Error::setup_failed(
                    format!(
                        "Failed to clear temp directory {}: {}",
                        self.temp_dir.display(),
                        e
                    ),
                    Some("prepare temp dir".to_string()),
                )
            })?;
        }
        fs::create_dir_all(&self.temp_dir).map_err(|e| {
            Error::setup_failed(
                format!(
                    "Failed to create temp directory {}: {}",
                    self.temp_dir.display(),
                    e
                ),
                Some("prepare temp dir".to_string()),
            )
        })?;

        fs::create_dir_all(&self.log_dir).map_err(|e| {
            Error::setup_failed(
                format!(
                    "Failed to create log directory {}: {}",
                    self.log_dir.display(),
                    e
                ),
                Some("prepare log dir".to_string()),
            )
        })?;
        prune::prune_older_than(&self.log_dir, self.prune_days)?;

        let log_name = match &self.log_name {
            Some(name) => name.clone(),
            None => default_log_name(&timestamp()),
        };

        Ok(Workspace {
            temp_dir: self.temp_dir.clone(),
            log_file: self.log_dir.join(log_name),
            delete_on_drop: true,
        })
    }
}

/// Second-granularity timestamp used for default log file names.
fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn default_log_name(timestamp: &str) -> String {
    format!("{}_{}.log", program_stem(), timestamp)
}

/// Stem of the running executable, falling back to the crate name when the
/// executable path is unavailable.
fn program_stem() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Guard over the bootstrapped environment. Owns the temp directory for the
/// lifetime of the process's work and removes it on drop — every normal exit
/// path releases it, though a signal that kills the process outright will
/// leave the directory behind.
#[derive(Debug)]
pub struct Workspace {
    temp_dir: PathBuf,
    log_file: PathBuf,
    delete_on_drop: bool,
}

impl Workspace {
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Release the guard without deleting the temp directory.
    pub fn into_path(mut self) -> PathBuf {
        self.delete_on_drop = false;
        self.temp_dir.clone()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.delete_on_drop {
            let _ = fs::remove_dir_all(&self.temp_dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn prepare_empties_a_preexisting_temp_dir() {
        let root = tempdir().unwrap();
        let temp = root.path().join("scratch");
        fs::create_dir_all(&temp).unwrap();
        File::create(temp.join("stale.bin")).unwrap();

        let workspace = Bootstrap::new(&temp, root.path().join("logs"))
            .prepare()
            .unwrap();

        assert!(workspace.temp_dir().exists());
        assert_eq!(fs::read_dir(workspace.temp_dir()).unwrap().count(), 0);
    }

    #[test]
    fn default_log_name_is_stem_plus_timestamp() {
        let name = default_log_name("20260804_120000");
        let stem = program_stem();
        let middle = name
            .strip_prefix(&format!("{}_", stem))
            .and_then(|rest| rest.strip_suffix(".log"))
            .unwrap();

        assert_eq!(middle.len(), 15);
        assert_eq!(middle.as_bytes()[8], b'_');
        assert!(middle
            .chars()
            .filter(|c| *c != '_')
            .all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn explicit_log_name_wins_over_the_default() {
        let root = tempdir().unwrap();
        let workspace = Bootstrap::new(root.path().join("scratch"), root.path().join("logs"))
            .log_name("session.log")
            .prepare()
            .unwrap();

        assert!(workspace.log_file().ends_with("session.log"));
    }

    #[test]
    fn empty_log_name_keeps_the_default() {
        let root = tempdir().unwrap();
        let workspace = Bootstrap::new(root.path().join("scratch"), root.path().join("logs"))
            .log_name("")
            .prepare()
            .unwrap();

        let name = workspace.log_file().file_name().unwrap().to_string_lossy();
        assert!(name.ends_with(".log"));
        assert!(name.starts_with(&program_stem()));
    }

    #[test]
    fn dropping_the_workspace_removes_the_temp_dir() {
        let root = tempdir().unwrap();
        let temp = root.path().join("scratch");
        let workspace = Bootstrap::new(&temp, root.path().join("logs"))
            .prepare()
            .unwrap();
        File::create(workspace.temp_dir().join("work.tmp")).unwrap();

        drop(workspace);
        assert!(!temp.exists());
    }

    #[test]
    fn into_path_keeps_the_temp_dir() {
        let root = tempdir().unwrap();
        let temp = root.path().join("scratch");
        let workspace = Bootstrap::new(&temp, root.path().join("logs"))
            .prepare()
            .unwrap();

        let kept = workspace.into_path();
        assert!(kept.exists());
    }

    #[test]
    fn init_rejects_unknown_log_levels_before_touching_disk() {
        let root = tempdir().unwrap();
        let temp = root.path().join("scratch");
        let err = Bootstrap::new(&temp, root.path().join("logs"))
            .log_level("shouty")
            .init()
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationInvalidArgument);
        assert!(!temp.exists());
    }

    #[test]
    fn init_installs_logging_and_refuses_a_second_install() {
        let root = tempdir().unwrap();
        let workspace = Bootstrap::new(root.path().join("scratch"), root.path().join("logs"))
            .log_name("first.log")
            .log_level("debug")
            .init()
            .unwrap();
        assert!(workspace.log_file().exists());

        let err = Bootstrap::new(root.path().join("scratch2"), root.path().join("logs"))
            .log_name("second.log")
            .init()
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::SetupFailed);
    }
}
