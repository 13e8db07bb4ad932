//! Configuration structures and loading logic.

use crate::config::modes::ErrorPolicy;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default mount table consulted for storage state.
pub const DEFAULT_MOUNT_TABLE: &str = "/proc/self/mounts";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sizing: SizingConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Directory size options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizingConfig {
    /// What to do with entries that cannot be read.
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

/// External storage options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// What to do when a root's state cannot be determined.
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Mount table used to classify roots.
    #[serde(default = "default_mount_table")]
    pub mount_table: PathBuf,

    /// App-specific directories, one per storage volume.
    #[serde(default)]
    pub candidates: Vec<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            mount_table: default_mount_table(),
            candidates: Vec::new(),
        }
    }
}

fn default_mount_table() -> PathBuf {
    PathBuf::from(DEFAULT_MOUNT_TABLE)
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file at `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Per-user configuration file location.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "diskutil")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("diskutil.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [sizing]
            error_policy = "fail"

            [storage]
            error_policy = "skip"
            mount_table = "/tmp/mounts"
            candidates = ["/storage/emulated/0/Android/data/org.example/files"]
            "#,
        )
        .unwrap();

        assert_eq!(config.sizing.error_policy, ErrorPolicy::Fail);
        assert_eq!(config.storage.error_policy, ErrorPolicy::Skip);
        assert_eq!(config.storage.mount_table, PathBuf::from("/tmp/mounts"));
        assert_eq!(config.storage.candidates.len(), 1);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.storage.mount_table,
            PathBuf::from(DEFAULT_MOUNT_TABLE)
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.sizing.error_policy = ErrorPolicy::Fail;
        config.storage.candidates = vec![PathBuf::from("/mnt/sd/Android/data/x")];
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sizing]\nerror_policy = \"sometimes\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
    }
}
