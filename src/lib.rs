//! molt - live class reloading for dynamic runtimes.
//!
//! Tracks which previously loaded source modules have changed on disk,
//! unloads the affected class definitions and reloads them, propagating the
//! reload to every structural dependent (subclasses, role consumers, classes
//! instancing an affected metaclass). A long-running process (REPL,
//! application server) picks up source edits without a restart.
//!
//! The host supplies the loader, unloader and live type registry behind the
//! [`Runtime`] trait; molt owns change detection and refresh ordering.
//!
//! ```ignore
//! use molt::{NamingScheme, RefreshEngine};
//!
//! let scheme = NamingScheme::new("lib", "cls");
//! let mut engine = RefreshEngine::with_scheme(host, scheme);
//! // ... host loads modules, user edits sources ...
//! let report = engine.refresh();
//! if report.has_errors() {
//!     // broken modules stay unloaded until edited again
//! }
//! ```

mod engine;
mod error;
mod fingerprint;
mod identity;
pub mod logger;
mod resolver;
mod runtime;
mod tracker;

#[cfg(test)]
mod testutil;

pub use engine::{ModuleRefresh, RefreshEngine, RefreshReport};
pub use error::{LoadError, RefreshError};
pub use fingerprint::{Fingerprint, FingerprintCache};
pub use identity::{Identity, NamingScheme};
pub use resolver::closure_of;
pub use runtime::{Runtime, TypeKind};
pub use tracker::ChangeTracker;
