use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Base legwork config directory (~/.config/legwork on Unix-likes)
pub fn config_root() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::setup_failed(
                "APPDATA environment variable not set on Windows".to_string(),
                Some("resolve config root".to_string()),
            )
        })?;
        Ok(PathBuf::from(appdata).join("legwork"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::setup_failed(
                "HOME environment variable not set on Unix-like system".to_string(),
                Some("resolve config root".to_string()),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("legwork"))
    }
}

/// Default log directory
pub fn logs() -> Result<PathBuf> {
    Ok(config_root()?.join("logs"))
}

/// Default scratch directory under the system temp root
pub fn scratch() -> PathBuf {
    env::temp_dir().join("legwork")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_lives_under_the_config_root() {
        let root = config_root().unwrap();
        assert!(logs().unwrap().starts_with(root));
    }

    #[test]
    fn scratch_lives_under_the_system_temp_dir() {
        assert!(scratch().starts_with(env::temp_dir()));
    }
}
