//! Per-tracker cache of last-observed file fingerprints.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::Fingerprint;

/// Mapping from file path to the fingerprint last observed by this process.
///
/// Owned by a [`ChangeTracker`](crate::ChangeTracker) instance rather than
/// held as process-wide state, so independent tracked scopes can coexist.
/// Entries are never persisted: the cache models what this running process
/// has already seen.
///
/// Keys are the exact paths produced by the naming scheme in use; no
/// canonicalization happens here, the host must report loaded files under
/// the same spelling.
#[derive(Debug, Default)]
pub struct FingerprintCache {
    entries: FxHashMap<PathBuf, Fingerprint>,
}

impl FingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-observed fingerprint for a path, if any.
    #[inline]
    pub fn get(&self, path: &Path) -> Option<Fingerprint> {
        self.entries.get(path).copied()
    }

    #[inline]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Stat `path` now and force-write the result as its fingerprint.
    ///
    /// Returns the recorded fingerprint ([`Fingerprint::Unseen`] when the
    /// file is currently absent, which is still a deliberate observation).
    pub fn record(&mut self, path: &Path) -> Fingerprint {
        let fp = Fingerprint::of(path);
        self.entries.insert(path.to_path_buf(), fp);
        fp
    }

    /// Drop the entry for `path`, returning the old fingerprint if present.
    pub fn forget(&mut self, path: &Path) -> Option<Fingerprint> {
        self.entries.remove(path)
    }

    /// Iterate over all tracked paths (arbitrary order).
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
