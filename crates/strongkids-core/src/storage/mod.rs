mod config;
pub mod database;
mod store;

pub use config::{CelebrationConfig, ChallengeConfig, Config, DisplayConfig};
pub use database::Database;
pub use store::{MemoryStore, SnapshotStore, PENDING_SLOT, SNAPSHOT_SLOT};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `STRONGKIDS_DATA_DIR` wins when set. Otherwise `~/.config/strongkids/`,
/// or `~/.config/strongkids-dev/` with `STRONGKIDS_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STRONGKIDS_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STRONGKIDS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("strongkids-dev")
            } else {
                base_dir.join("strongkids")
            }
        }
    };

    ensure_dir(dir)
}

/// Create `dir` and its parents if missing.
///
/// # Errors
/// Returns [`ConfigError::DataDir`] if the directory cannot be created.
pub fn ensure_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        assert_eq!(ensure_dir(nested.clone()).unwrap(), nested);
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_dir_reports_data_dir_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();
        let err = ensure_dir(file.join("sub")).unwrap_err();
        assert!(matches!(err, ConfigError::DataDir(_)));
    }
}
