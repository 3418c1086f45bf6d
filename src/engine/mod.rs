//! Refresh engine: drives unload/reload through dependency closures.
//!
//! Control flow per cycle: `scan()` emits changed modules, each module's
//! closure is computed, filtered to what was actually loaded, torn down in
//! order and reloaded in the same order. No cross-module transaction: a
//! failure refreshing one module never blocks the next.

use crate::error::RefreshError;
use crate::identity::{Identity, NamingScheme};
use crate::logger;
use crate::resolver;
use crate::runtime::Runtime;
use crate::tracker::ChangeTracker;
use crate::{debug, log};


// =============================================================================
// Reports
// =============================================================================

/// Outcome of refreshing one module and its dependents.
#[derive(Debug, Default)]
pub struct ModuleRefresh {
    /// The filtered closure the engine acted on, in unload/reload order.
    pub closure: Vec<Identity>,
    /// Identities successfully reloaded.
    pub reloaded: Vec<Identity>,
    /// Load failures ([`RefreshError::LoadFailure`] entries).
    pub failures: Vec<RefreshError>,
}

impl ModuleRefresh {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Outcome of a whole refresh cycle.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Every identity reloaded across all refreshed modules.
    pub reloaded: Vec<Identity>,
    /// Load failures plus per-module fatal errors.
    pub failures: Vec<RefreshError>,
}

impl RefreshReport {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }

    /// True when the cycle performed no loader operations at all.
    pub fn is_noop(&self) -> bool {
        self.reloaded.is_empty() && self.failures.is_empty()
    }
}

// =============================================================================
// RefreshEngine
// =============================================================================

/// Owns the change tracker and the host runtime handle, and runs refresh
/// cycles against them.
///
/// All operations take `&mut self`: a cycle runs to completion on one
/// thread, and concurrent callers must serialize externally (wrapping the
/// engine in a `parking_lot::Mutex` is the recommended minimum).
pub struct RefreshEngine<R: Runtime> {
    runtime: R,
    tracker: ChangeTracker,
}

impl<R: Runtime> RefreshEngine<R> {
    /// Engine with the default naming scheme (`./Name.cls`).
    pub fn new(runtime: R) -> Self {
        Self::with_scheme(runtime, NamingScheme::default())
    }

    pub fn with_scheme(runtime: R, scheme: NamingScheme) -> Self {
        Self {
            runtime,
            tracker: ChangeTracker::new(scheme),
        }
    }

    #[inline]
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    #[inline]
    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    #[inline]
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    #[inline]
    pub fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }

    /// Scan for changed modules and refresh each one.
    ///
    /// Errors never abort the cycle. Load failures and per-module fatal
    /// errors (unknown metaclass) are collected into the report; the
    /// remaining modules still refresh.
    pub fn refresh(&mut self) -> RefreshReport {
        let changed = self.tracker.scan(&self.runtime);
        if changed.is_empty() {
            logger::status_unchanged("no modules changed");
            return RefreshReport::default();
        }
        debug!("scan"; "{} module(s) changed", changed.len());

        let mut report = RefreshReport::default();
        for id in changed {
            match self.refresh_module(&id) {
                Ok(module) => {
                    report.reloaded.extend(module.reloaded);
                    report.failures.extend(module.failures);
                }
                Err(err) => {
                    log!("error"; "{err}");
                    report.failures.push(err);
                }
            }
        }
        report
    }

    /// Refresh one module together with everything that structurally
    /// depends on it.
    ///
    /// The closure is filtered to identities with something to act on:
    /// currently loaded, or still tracked from an earlier load whose unload
    /// raced us. Dependents that were never loaded are skipped. The whole
    /// filtered closure is unloaded before anything is reloaded; a subclass
    /// reloaded while its ancestor is still stale would capture the old
    /// definition.
    pub fn refresh_module(&mut self, id: &Identity) -> Result<ModuleRefresh, RefreshError> {
        let closure = resolver::closure_of(&self.runtime, id)?;
        let closure: Vec<Identity> = closure
            .into_iter()
            .filter(|member| {
                let path = self.tracker.scheme().path_of(member);
                self.runtime.is_loaded(&path) || self.tracker.is_tracked(member)
            })
            .collect();
        debug!("refresh"; "{id}: acting on {} of closure", closure.len());

        for member in &closure {
            self.unload_module(member);
        }

        let mut refresh = ModuleRefresh {
            closure,
            ..ModuleRefresh::default()
        };
        for member in refresh.closure.clone() {
            match self.load_module(&member) {
                Ok(()) => refresh.reloaded.push(member),
                Err(err) => refresh.failures.push(err),
            }
        }
        Ok(refresh)
    }

    /// Unload one identity: host unloader, descriptor cleanup, then drop the
    /// fingerprint so a failed reload leaves the module unseen, not
    /// unchanged.
    pub fn unload_module(&mut self, id: &Identity) {
        debug!("refresh"; "unloading {id}");
        self.runtime.unload(id);
        if self.runtime.is_reflective() {
            // Some unloaders leave the reflective registration behind, and a
            // ghost descriptor corrupts the next dependency walk.
            self.runtime.remove_descriptor(id);
        }
        self.tracker.forget(id);
    }

    /// Load one identity, recording the attempt either way.
    ///
    /// Failures are returned as values for the caller to report; they are
    /// never fatal to the surrounding cycle. The fingerprint reflects the
    /// attempt, so an unchanged broken file is not retried on every scan.
    pub fn load_module(&mut self, id: &Identity) -> Result<(), RefreshError> {
        match self.runtime.load(id) {
            Ok(()) => {
                self.tracker.record_loaded(id);
                logger::status_success(&format!("reloaded: {id}"));
                Ok(())
            }
            Err(source) => {
                self.tracker.record_failed(id);
                logger::status_error(&format!("reload failed: {id}"), &format!("{source}"));
                Err(RefreshError::LoadFailure {
                    identity: id.clone(),
                    source,
                })
            }
        }
    }
}
