//! Digest module.
//!
//! Provides:
//! - Fixed-length MD5 cache keys for arbitrary strings
//! - String-hash fallback when no digest is compiled in

pub mod key;

pub use key::{disk_key, hash_key_for_disk, string_hash, DiskKey, KeyDigest, PRIMARY_DIGEST};
