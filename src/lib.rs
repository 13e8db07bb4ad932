//! diskutil - file and content utilities for media libraries.
//!
//! # Features
//!
//! - Image detection by extension and magic bytes (GIF, PNG, JPEG, WEBP)
//! - Fixed-length MD5 cache keys for arbitrary strings
//! - Recursive directory sizes
//! - Mounted, readable external storage roots
//! - FAT-safe filenames with a bounded length
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::path::Path;
//! use diskutil::{build_valid_filename, directory_size, hash_key_for_disk, is_image, ErrorPolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let name = build_valid_filename("Chapter 1: The Start?");
//!     let key = hash_key_for_disk("https://example.com/cover");
//!     let cover = Path::new("cache").join(&key);
//!
//!     if is_image(&key, Some(|| File::open(&cover))) {
//!         println!("{} -> {}", name, cover.display());
//!     }
//!
//!     let bytes = directory_size(Path::new("cache"), ErrorPolicy::Skip)?;
//!     println!("cache uses {} bytes", bytes);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod fs;
pub mod output;
pub mod sniff;

// Re-exports for convenience
pub use config::{Config, ErrorPolicy};
pub use digest::{disk_key, hash_key_for_disk, DiskKey, KeyDigest};
pub use error::{Error, Result};
pub use fs::{
    build_valid_filename, directory_size, external_storages, MountState, MountTable, StorageHost,
};
pub use sniff::{detect, is_image, Detection, ImageFormat, NO_STREAM};
