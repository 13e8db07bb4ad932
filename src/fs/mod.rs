//! Filesystem module.
//!
//! Provides:
//! - FAT-safe filename generation
//! - Recursive directory sizes
//! - External storage root discovery

pub mod naming;
pub mod size;
pub mod storage;

pub use naming::{
    build_valid_filename, is_valid_fat_filename_char, INVALID_FILENAME, MAX_FILENAME_LEN,
};
pub use size::directory_size;
pub use storage::{
    external_storages, parse_mounts, storage_root, MountEntry, MountState, MountTable,
    StorageHost,
};
