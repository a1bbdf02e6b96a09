//! Cache entry metadata for staleness detection.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Cache schema version, bumped on any format change to invalidate old
/// entries.
pub const CACHE_VERSION: u32 = 1;

/// Identity of a source file at the time its results were cached.
///
/// Any change to size or mtime makes the stored entry stale; a stale entry
/// is never served, only replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIdentity {
    pub path: PathBuf,
    pub size: u64,
    pub mtime_secs: i64,
}

impl FileIdentity {
    /// Capture the current identity of a file. The path is canonicalized so
    /// the same file reached through different spellings shares one entry.
    pub fn from_path(path: &Path) -> Result<Self> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("failed to canonicalize {}", path.display()))?;
        let metadata = fs::metadata(&canonical)
            .with_context(|| format!("failed to stat {}", canonical.display()))?;
        let mtime = metadata.modified().context("filesystem reports no mtime")?;
        let mtime_secs = mtime
            .duration_since(SystemTime::UNIX_EPOCH)
            .context("mtime predates the unix epoch")?
            .as_secs() as i64;
        Ok(FileIdentity { path: canonical, size: metadata.len(), mtime_secs })
    }
}

/// On-disk metadata stored next to each entry's result blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub version: u32,
    pub identity: FileIdentity,
}
