//! Change tracking: classify every tracked/loaded file on each scan.
//!
//! A scan compares the host's loaded-file set against the fingerprint cache:
//!
//! - tracked but no longer loaded → changed (disappeared, force-refresh)
//! - loaded but not yet tracked   → silent baseline, no refresh emitted
//! - loaded and tracked           → changed iff the fingerprint moved

use rustc_hash::FxHashSet;
use std::path::PathBuf;

use crate::fingerprint::{Fingerprint, FingerprintCache};
use crate::identity::{Identity, NamingScheme};
use crate::runtime::Runtime;

/// Tracks which previously loaded source files have changed on disk.
#[derive(Debug)]
pub struct ChangeTracker {
    scheme: NamingScheme,
    cache: FingerprintCache,
    /// Paths whose last load attempt failed. A quarantined path that has not
    /// been edited since the attempt is not reported again, even though its
    /// module dropped out of the loaded-file set.
    quarantined: FxHashSet<PathBuf>,
}

impl ChangeTracker {
    pub fn new(scheme: NamingScheme) -> Self {
        Self {
            scheme,
            cache: FingerprintCache::new(),
            quarantined: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn scheme(&self) -> &NamingScheme {
        &self.scheme
    }

    /// Compare the loaded-file set against the cache and emit the identities
    /// needing refresh.
    ///
    /// Order across unrelated modules is arbitrary; dependency ordering is
    /// applied later, per module.
    pub fn scan(&mut self, runtime: &impl Runtime) -> Vec<Identity> {
        let loaded = runtime.loaded_paths();
        let loaded_set: FxHashSet<&PathBuf> = loaded.iter().collect();
        let mut changed = Vec::new();

        // Tracked files that vanished from the loaded set: reload may have
        // raced with an unload, so force a refresh. Quarantined files are
        // the exception, they vanished because their last reload failed and
        // only an edit should retry them.
        let gone: Vec<PathBuf> = self
            .cache
            .paths()
            .filter(|p| !loaded_set.contains(*p))
            .cloned()
            .collect();
        for path in gone {
            if self.quarantined.contains(&path) {
                if Some(Fingerprint::of(&path)) == self.cache.get(&path) {
                    continue;
                }
                // Edited since the failed attempt: retry.
                self.quarantined.remove(&path);
            }
            changed.push(self.scheme.identity_of(&path));
        }

        for path in &loaded {
            match self.cache.get(path) {
                // First observation establishes the baseline, not a change.
                None => {
                    self.cache.record(path);
                }
                Some(last) => {
                    if Fingerprint::of(path) != last {
                        changed.push(self.scheme.identity_of(path));
                    }
                }
            }
        }

        changed
    }

    /// Force-write a fresh fingerprint for the identity's file.
    ///
    /// Called after every successful load.
    pub fn record_loaded(&mut self, id: &Identity) {
        let path = self.scheme.path_of(id);
        self.quarantined.remove(&path);
        self.cache.record(&path);
    }

    /// Record a failed load attempt.
    ///
    /// The fingerprint is still refreshed, so the broken file is not
    /// reported as changed again until it is actually edited.
    pub fn record_failed(&mut self, id: &Identity) {
        let path = self.scheme.path_of(id);
        self.cache.record(&path);
        self.quarantined.insert(path);
    }

    /// Stop tracking the identity's file.
    ///
    /// Called immediately before unload, so a module that fails to reload
    /// afterward is treated as unseen rather than unchanged.
    pub fn forget(&mut self, id: &Identity) {
        let path = self.scheme.path_of(id);
        self.quarantined.remove(&path);
        self.cache.forget(&path);
    }

    /// Whether the identity's file is currently tracked.
    pub fn is_tracked(&self, id: &Identity) -> bool {
        self.cache.contains(&self.scheme.path_of(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop all tracking state.
    pub fn clear(&mut self) {
        self.quarantined.clear();
        self.cache.clear();
    }
}
