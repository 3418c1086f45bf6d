//! Refresh error types.

use std::fmt;

use thiserror::Error;

use crate::identity::Identity;

// ============================================================================
// LoadError
// ============================================================================

/// Failure reported by the host loader when (re)executing a module's source.
///
/// The underlying cause (syntax error, exception during class construction)
/// is host-specific, so it travels as an opaque [`anyhow::Error`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct LoadError(#[from] pub anyhow::Error);

impl LoadError {
    /// Build a load error from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }
}

// ============================================================================
// RefreshError
// ============================================================================

/// Errors surfaced by a refresh cycle.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Source failed to execute during reload.
    ///
    /// Recoverable: reported, never aborts the batch. The module is left
    /// unloaded until a later successful reload, so callers of the class
    /// fail until the source is fixed.
    #[error("failed to reload `{identity}`: {source}")]
    LoadFailure {
        identity: Identity,
        #[source]
        source: LoadError,
    },

    /// Dependency resolution met a type descriptor kind it does not
    /// understand. Fatal for that module's refresh: silently skipping would
    /// leave dependents unreloaded and inconsistent.
    #[error("unknown metaclass behind `{identity}`, refusing partial refresh")]
    UnknownMetaclass { identity: Identity },
}

impl RefreshError {
    /// The identity the error is attached to.
    pub fn identity(&self) -> &Identity {
        match self {
            Self::LoadFailure { identity, .. } | Self::UnknownMetaclass { identity } => identity,
        }
    }

    /// Whether the batch may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LoadFailure { .. })
    }
}
