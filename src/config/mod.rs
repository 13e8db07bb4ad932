//! Configuration module for diskutil.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument merging
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, SizingConfig, StorageConfig, DEFAULT_MOUNT_TABLE};
pub use modes::ErrorPolicy;
pub use validation::validate_config;
