//! Recursive directory size.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use crate::config::ErrorPolicy;
use crate::error::{Error, Result};

/// Total size in bytes of the files under `path`.
///
/// A file yields its own length. `path` itself is resolved. A symbolic link
/// below `path` adds the length of the file it points to; links to
/// directories are not descended into and count as zero. Entries that
/// cannot be read, dangling links included, are handled according to
/// `policy`. A missing `path` is always an error.
pub fn directory_size(path: &Path, policy: ErrorPolicy) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| Error::walk(path, e))?;
    entry_size(path, &metadata, policy)
}

fn entry_size(path: &Path, metadata: &Metadata, policy: ErrorPolicy) -> Result<u64> {
    if metadata.is_file() {
        return Ok(metadata.len());
    }
    if !metadata.is_dir() {
        return Ok(0);
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => return unreadable(path, e, policy),
    };

    let mut total: u64 = 0;
    for entry in entries {
        let size = match entry {
            Ok(entry) => {
                let child = entry.path();
                // DirEntry::metadata does not traverse symlinks
                match entry.metadata() {
                    Ok(child_metadata) if child_metadata.file_type().is_symlink() => {
                        link_size(&child, policy)?
                    }
                    Ok(child_metadata) => entry_size(&child, &child_metadata, policy)?,
                    Err(e) => unreadable(&child, e, policy)?,
                }
            }
            Err(e) => unreadable(path, e, policy)?,
        };
        total = total.saturating_add(size);
    }

    Ok(total)
}

/// Length of the file behind a symlink; directory targets count as zero.
fn link_size(link: &Path, policy: ErrorPolicy) -> Result<u64> {
    match fs::metadata(link) {
        Ok(target) if target.is_file() => Ok(target.len()),
        Ok(_) => Ok(0),
        Err(e) => unreadable(link, e, policy),
    }
}

fn unreadable(path: &Path, err: io::Error, policy: ErrorPolicy) -> Result<u64> {
    match policy {
        ErrorPolicy::Skip => {
            tracing::warn!("Skipping unreadable entry {}: {}", path.display(), err);
            Ok(0)
        }
        ErrorPolicy::Fail => Err(Error::walk(path, err)),
    }
}
