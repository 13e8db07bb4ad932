//! Cache keys derived from arbitrary strings.

use std::fmt;

/// Digest used for disk keys when available.
pub const PRIMARY_DIGEST: &str = "MD5";

/// Digest algorithm available to this build.
///
/// Has no variants when the crate is built without the `md5` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDigest {
    #[cfg(feature = "md5")]
    Md5,
}

impl KeyDigest {
    /// Look up a digest by name (case-insensitive).
    pub fn resolve(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            #[cfg(feature = "md5")]
            "MD5" => Some(KeyDigest::Md5),
            _ => None,
        }
    }

    /// Lowercase hex digest of `bytes`.
    pub fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            #[cfg(feature = "md5")]
            KeyDigest::Md5 => {
                use md5::{Digest, Md5};
                format!("{:x}", Md5::digest(bytes))
            }
        }
    }
}

/// A derived disk key, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskKey {
    /// Hex digest, fixed length.
    Digest(String),
    /// Decimal string hash, variable length and not collision-resistant.
    Fallback(String),
}

impl DiskKey {
    pub fn as_str(&self) -> &str {
        match self {
            DiskKey::Digest(key) | DiskKey::Fallback(key) => key,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            DiskKey::Digest(key) | DiskKey::Fallback(key) => key,
        }
    }

    pub fn is_digest(&self) -> bool {
        matches!(self, DiskKey::Digest(_))
    }
}

impl fmt::Display for DiskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive a key for `key` with the given digest, or the string hash without one.
pub fn disk_key(key: &str, digest: Option<KeyDigest>) -> DiskKey {
    match digest {
        Some(digest) => DiskKey::Digest(digest.hex_digest(key.as_bytes())),
        None => {
            tracing::debug!("No digest available, using string hash for disk key");
            DiskKey::Fallback(string_hash(key).to_string())
        }
    }
}

/// Map a string to a file-name-safe cache key.
///
/// Yields 32 lowercase hex characters (MD5). Builds without the digest
/// return the decimal string hash instead.
pub fn hash_key_for_disk(key: &str) -> String {
    disk_key(key, KeyDigest::resolve(PRIMARY_DIGEST)).into_string()
}

/// Polynomial string hash (`h = 31 * h + unit`) over UTF-16 code units,
/// wrapping in 32-bit signed arithmetic.
pub fn string_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
