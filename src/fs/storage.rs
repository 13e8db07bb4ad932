//! External storage roots.

use std::convert::Infallible;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::{ErrorPolicy, StorageConfig};
use crate::error::{Error, Result};

/// Directory separating a volume root from the app-specific tree below it.
const ANDROID_DIR: &str = "Android";

/// Mount state of a storage volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Removed,
    Checking,
    Unknown,
}

impl MountState {
    /// Whether files on the volume can at least be read.
    pub fn is_readable(&self) -> bool {
        matches!(self, MountState::Mounted | MountState::MountedReadOnly)
    }
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountState::Mounted => write!(f, "mounted"),
            MountState::MountedReadOnly => write!(f, "mounted_ro"),
            MountState::Unmounted => write!(f, "unmounted"),
            MountState::Removed => write!(f, "removed"),
            MountState::Checking => write!(f, "checking"),
            MountState::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for MountState {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "mounted" => MountState::Mounted,
            "mounted_ro" => MountState::MountedReadOnly,
            "unmounted" => MountState::Unmounted,
            "removed" => MountState::Removed,
            "checking" => MountState::Checking,
            _ => MountState::Unknown,
        })
    }
}

/// Source of storage candidates and their mount state.
pub trait StorageHost {
    /// App-specific directories, one per volume; `None` for volumes that
    /// are currently unavailable.
    fn candidate_dirs(&self) -> Vec<Option<PathBuf>>;

    /// Mount state of a volume root.
    fn storage_state(&self, root: &Path) -> Result<MountState>;
}

/// Volume root of an app-specific directory: everything before the first
/// `/Android/` component.
///
/// Paths without the marker are returned unchanged.
pub fn storage_root(candidate: &Path) -> PathBuf {
    let components: Vec<Component<'_>> = candidate.components().collect();
    let marker = Component::Normal(OsStr::new(ANDROID_DIR));
    // A final `Android` only counts when followed by a separator
    let trailing_separator = candidate.to_string_lossy().ends_with('/');

    let position = (1..components.len()).find(|&i| {
        components[i] == marker && (i + 1 < components.len() || trailing_separator)
    });

    match position {
        Some(pos) => components[..pos].iter().collect(),
        None => candidate.to_path_buf(),
    }
}

/// Roots of all external storages that are mounted and readable.
///
/// Candidate order is preserved. A root whose state cannot be queried is
/// left out under [`ErrorPolicy::Skip`] and fails the call under
/// [`ErrorPolicy::Fail`].
pub fn external_storages<H>(host: &H, policy: ErrorPolicy) -> Result<Vec<PathBuf>>
where
    H: StorageHost + ?Sized,
{
    let mut roots = Vec::new();

    for candidate in host.candidate_dirs().into_iter().flatten() {
        let root = storage_root(&candidate);

        match host.storage_state(&root) {
            Ok(state) if state.is_readable() => roots.push(root),
            Ok(state) => {
                tracing::debug!("Ignoring storage {} ({})", root.display(), state);
            }
            Err(e) => match policy {
                ErrorPolicy::Skip => {
                    tracing::warn!("Ignoring storage {}: {}", root.display(), e);
                }
                ErrorPolicy::Fail => return Err(e),
            },
        }
    }

    Ok(roots)
}

/// One line of a mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub mount_point: PathBuf,
    pub read_only: bool,
}

/// Parse a mount table in `/proc/mounts` format.
///
/// Malformed lines are skipped.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _device = fields.next()?;
            let mount_point = fields.next()?;
            let _fstype = fields.next()?;
            let options = fields.next()?;

            Some(MountEntry {
                mount_point: PathBuf::from(unescape_mount_field(mount_point)),
                read_only: options.split(',').any(|opt| opt == "ro"),
            })
        })
        .collect()
}

/// Decode the octal escapes (`\040` and friends) used in mount tables.
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && is_octal_escape(&bytes[i + 1..i + 4]) {
            let value = bytes[i + 1..i + 4]
                .iter()
                .fold(0u8, |acc, b| acc.wrapping_mul(8).wrapping_add(b - b'0'));
            out.push(value);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_escape(digits: &[u8]) -> bool {
    digits.len() == 3 && digits[0] <= b'3' && digits.iter().all(|b| (b'0'..=b'7').contains(b))
}

/// Storage host backed by configured candidates and a mount table.
///
/// The table is read once, on the first state query.
#[derive(Debug)]
pub struct MountTable {
    candidates: Vec<PathBuf>,
    table: PathBuf,
    entries: OnceLock<Option<Vec<MountEntry>>>,
}

impl MountTable {
    pub fn new(candidates: Vec<PathBuf>, table: impl Into<PathBuf>) -> Self {
        Self {
            candidates,
            table: table.into(),
            entries: OnceLock::new(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.candidates.clone(), config.mount_table.clone())
    }

    /// Entries of the mount table, or `None` if it cannot be read.
    fn entries(&self) -> Option<&[MountEntry]> {
        self.entries.get_or_init(|| self.read_entries()).as_deref()
    }

    fn read_entries(&self) -> Option<Vec<MountEntry>> {
        match fs::read_to_string(&self.table) {
            Ok(content) => Some(parse_mounts(&content)),
            Err(e) => {
                tracing::debug!("Mount table {} unavailable: {}", self.table.display(), e);
                None
            }
        }
    }
}

impl StorageHost for MountTable {
    fn candidate_dirs(&self) -> Vec<Option<PathBuf>> {
        self.candidates.iter().cloned().map(Some).collect()
    }

    fn storage_state(&self, root: &Path) -> Result<MountState> {
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(MountState::Removed),
            Err(e) => {
                return Err(Error::StorageState {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        if !metadata.is_dir() {
            return Ok(MountState::Unknown);
        }

        if fs::read_dir(root).is_err() {
            return Ok(MountState::Unmounted);
        }

        let Some(entries) = self.entries() else {
            return Ok(if metadata.permissions().readonly() {
                MountState::MountedReadOnly
            } else {
                MountState::Mounted
            });
        };

        // Innermost mount containing the root decides.
        let state = entries
            .iter()
            .filter(|entry| root.starts_with(&entry.mount_point))
            .max_by_key(|entry| entry.mount_point.components().count())
            .map(|entry| {
                if entry.read_only {
                    MountState::MountedReadOnly
                } else {
                    MountState::Mounted
                }
            })
            .unwrap_or(MountState::Unmounted);

        Ok(state)
    }
}
