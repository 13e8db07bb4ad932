//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, ErrorPolicy};
use crate::digest::PRIMARY_DIGEST;
use crate::output::OutputFormat;

/// File and content utilities.
#[derive(Parser, Debug)]
#[command(
    name = "diskutil",
    version,
    about = "File and content utilities for media libraries",
    long_about = "Detect images, derive cache keys, measure directory trees, list external \
                  storage roots and build FAT-safe filenames."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "DISKUTIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Hide progress information.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// How to treat entries that cannot be read (overrides the config file).
    #[arg(long = "on-error", value_enum, global = true)]
    pub on_error: Option<ErrorPolicyArg>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether files are images.
    Sniff {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Derive disk cache keys from strings.
    Hash {
        #[arg(required = true)]
        keys: Vec<String>,

        /// Digest algorithm; unknown names fall back to the string hash.
        #[arg(long, default_value = PRIMARY_DIGEST)]
        digest: String,
    },

    /// Total size of files and directory trees.
    Size {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List mounted, readable external storage roots.
    Storages {
        /// App-specific directory on a storage volume (repeatable).
        #[arg(long = "candidate")]
        candidates: Vec<PathBuf>,

        /// Mount table to consult.
        #[arg(long)]
        mount_table: Option<PathBuf>,
    },

    /// Turn strings into FAT-safe filenames.
    Sanitize {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// CLI error policy argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ErrorPolicyArg {
    /// Count unreadable entries as empty.
    Skip,
    /// Stop at the first unreadable entry.
    Fail,
}

impl From<ErrorPolicyArg> for ErrorPolicy {
    fn from(arg: ErrorPolicyArg) -> Self {
        match arg {
            ErrorPolicyArg::Skip => ErrorPolicy::Skip,
            ErrorPolicyArg::Fail => ErrorPolicy::Fail,
        }
    }
}

impl Args {
    /// Configuration file to load.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(policy) = self.on_error {
            config.sizing.error_policy = policy.into();
            config.storage.error_policy = policy.into();
        }

        if let Command::Storages {
            candidates,
            mount_table,
        } = &self.command
        {
            config.storage.candidates.extend(candidates.iter().cloned());

            if let Some(table) = mount_table {
                config.storage.mount_table = table.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hash_defaults() {
        let args = Args::try_parse_from(["diskutil", "hash", "a", "b"]).unwrap();
        assert_eq!(args.output_format(), OutputFormat::Text);

        match args.command {
            Command::Hash { keys, digest } => {
                assert_eq!(keys, vec!["a", "b"]);
                assert_eq!(digest, PRIMARY_DIGEST);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_requires_operands() {
        assert!(Args::try_parse_from(["diskutil", "sniff"]).is_err());
        assert!(Args::try_parse_from(["diskutil", "size"]).is_err());
        assert!(Args::try_parse_from(["diskutil", "storages"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["diskutil", "size", "/tmp", "--json", "--on-error", "fail"])
                .unwrap();
        assert_eq!(args.output_format(), OutputFormat::Json);
        assert!(matches!(args.on_error, Some(ErrorPolicyArg::Fail)));
    }

    #[test]
    fn test_merge_into_config() {
        let args = Args::try_parse_from([
            "diskutil",
            "storages",
            "--candidate",
            "/mnt/sd/Android/data/x",
            "--mount-table",
            "/tmp/mounts",
            "--on-error",
            "fail",
        ])
        .unwrap();

        let mut config = Config::default();
        config.storage.candidates = vec![PathBuf::from("/storage/emulated/0/Android/data/x")];
        args.merge_into_config(&mut config);

        assert_eq!(config.sizing.error_policy, ErrorPolicy::Fail);
        assert_eq!(config.storage.error_policy, ErrorPolicy::Fail);
        assert_eq!(config.storage.candidates.len(), 2);
        assert_eq!(config.storage.mount_table, PathBuf::from("/tmp/mounts"));
    }

    #[test]
    fn test_merge_keeps_config_without_flags() {
        let args = Args::try_parse_from(["diskutil", "sanitize", "x"]).unwrap();
        let mut config = Config::default();
        config.sizing.error_policy = ErrorPolicy::Fail;
        args.merge_into_config(&mut config);

        assert_eq!(config.sizing.error_policy, ErrorPolicy::Fail);
        assert_eq!(config.storage.error_policy, ErrorPolicy::Skip);
    }
}
