//! Configuration validation logic.

use std::path::{Path, PathBuf};

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_mount_table(&config.storage.mount_table)?;
    validate_candidates(&config.storage.candidates)?;

    Ok(())
}

/// Validate the mount table path.
pub fn validate_mount_table(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "storage.mount_table".to_string(),
            message: "Mount table path cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate storage candidate directories.
pub fn validate_candidates(candidates: &[PathBuf]) -> Result<()> {
    for candidate in candidates {
        if candidate.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                field: "storage.candidates".to_string(),
                message: "Candidate paths cannot be empty".to_string(),
            });
        }

        if !candidate.is_absolute() {
            return Err(Error::ConfigValidation {
                field: "storage.candidates".to_string(),
                message: format!(
                    "Candidate path must be absolute (got '{}')",
                    candidate.display()
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_candidates() {
        assert!(validate_candidates(&[PathBuf::from("/storage/emulated/0/Android/data")]).is_ok());
        assert!(validate_candidates(&[]).is_ok());
        assert!(validate_candidates(&[PathBuf::from("relative/Android/data")]).is_err());
        assert!(validate_candidates(&[PathBuf::new()]).is_err());
    }

    #[test]
    fn test_validate_mount_table() {
        let mut config = Config::default();
        config.storage.mount_table = PathBuf::new();

        match validate_config(&config) {
            Err(Error::ConfigValidation { field, .. }) => {
                assert_eq!(field, "storage.mount_table");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
