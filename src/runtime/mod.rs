//! Host runtime boundary.
//!
//! The module loader/unloader, the loaded-file set and the live type
//! registry all belong to the embedding host. This crate only ever talks to
//! them through the [`Runtime`] trait, and never caches what the registry
//! returns: the graph can change after every reload.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::identity::Identity;

// =============================================================================
// TypeKind
// =============================================================================

/// Kind of live type descriptor behind an identity.
///
/// Resolved once per identity during dependency resolution, then matched
/// exhaustively. [`TypeKind::Unknown`] maps to
/// [`RefreshError::UnknownMetaclass`](crate::RefreshError::UnknownMetaclass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A class. `metaclass` is true when the class can itself serve as the
    /// metaclass of other classes, making those classes its dependents.
    Class { metaclass: bool },
    /// A role/interface consumed by classes or other roles.
    Role,
    /// No live type information: a plain identity, or one that is genuinely
    /// unloaded. Its closure is itself alone.
    Unreflective,
    /// A descriptor kind this crate does not understand.
    Unknown,
}

// =============================================================================
// Runtime
// =============================================================================

/// The host runtime as seen by the refresh core.
///
/// # Contract
/// - [`load`](Runtime::load) must be safe on an already-loaded identity: it
///   re-executes the source, replacing prior definitions.
/// - [`unload`](Runtime::unload) must be safe on a never-loaded or
///   already-unloaded identity (no-op).
/// - Registry queries return identities in registration order; callers rely
///   on that order for refresh sequencing.
/// - Paths in the loaded-file set use the same spelling as the
///   [`NamingScheme`](crate::NamingScheme) the engine was built with.
pub trait Runtime {
    /// Enumerate the loaded-file set.
    fn loaded_paths(&self) -> Vec<PathBuf>;

    /// Whether a source path is currently in the loaded-file set.
    fn is_loaded(&self, path: &Path) -> bool;

    /// Load (or re-execute) the named module from source.
    fn load(&mut self, id: &Identity) -> Result<(), LoadError>;

    /// Remove the module's runtime definition, method table and metadata.
    fn unload(&mut self, id: &Identity);

    /// Whether the host carries reflective type metadata at all.
    ///
    /// When false, dependency propagation degenerates to refreshing single
    /// modules and descriptor cleanup is skipped.
    fn is_reflective(&self) -> bool;

    /// Resolve the live descriptor kind behind an identity.
    fn kind_of(&self, id: &Identity) -> TypeKind;

    /// Direct subclasses of a class, in registration order.
    fn subclasses_of(&self, id: &Identity) -> Vec<Identity>;

    /// Classes and roles consuming a role, in registration order.
    fn consumers_of(&self, id: &Identity) -> Vec<Identity>;

    /// Classes whose current type descriptor is an instance of this
    /// metaclass, in registration order.
    fn metaclass_instances_of(&self, id: &Identity) -> Vec<Identity>;

    /// Drop any reflective type-descriptor registration for an identity.
    ///
    /// Called after [`unload`](Runtime::unload) on reflective hosts: some
    /// unloaders leave the registration behind, and a ghost descriptor
    /// corrupts the next dependency walk.
    fn remove_descriptor(&mut self, id: &Identity);
}
