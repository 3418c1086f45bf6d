//! Stat-based file fingerprints.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Comparable snapshot of a file's on-disk metadata.
///
/// Two fingerprints compare unequal whenever the file's content may have
/// changed: device or inode moved, size differs, or mtime differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fingerprint {
    /// Sentinel: the file has not been observed on disk (or stat failed).
    Unseen,
    /// Observed metadata snapshot.
    Stat {
        dev: u64,
        ino: u64,
        len: u64,
        mtime: SystemTime,
    },
}

impl Fingerprint {
    /// Take the current fingerprint of `path`.
    ///
    /// Missing or unreadable files fingerprint as [`Fingerprint::Unseen`],
    /// which handles first-load bookkeeping: a file that appears later
    /// compares unequal to the sentinel and is reported as changed.
    pub fn of(path: &Path) -> Self {
        let Ok(meta) = fs::metadata(path) else {
            return Self::Unseen;
        };
        let (dev, ino) = file_id(&meta);
        Self::Stat {
            dev,
            ino,
            len: meta.len(),
            mtime: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }

    #[inline]
    pub fn is_unseen(&self) -> bool {
        matches!(self, Self::Unseen)
    }
}

#[cfg(unix)]
fn file_id(meta: &fs::Metadata) -> (u64, u64) {
    use std::os::unix::fs::MetadataExt;
    (meta.dev(), meta.ino())
}

/// Device/inode identity is unavailable here; size + mtime carry detection.
#[cfg(not(unix))]
fn file_id(_meta: &fs::Metadata) -> (u64, u64) {
    (0, 0)
}
