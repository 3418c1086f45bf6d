//! Module identities and the name ⇄ path convention.
//!
//! Pure string transforms. No side effects, no filesystem lookups:
//! whether a path actually exists is the fingerprint layer's business.

use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Identity
// =============================================================================

/// Canonical logical name of a loadable unit (class or role).
///
/// Convention names are dotted, e.g. `geometry.shapes.Square`. Names outside
/// the convention are carried verbatim as opaque, non-reloadable entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name matches the dotted naming convention.
    pub fn is_convention(&self) -> bool {
        is_convention_name(&self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// NamingScheme
// =============================================================================

/// Deterministic, bidirectional mapping between identities and source paths.
///
/// `geometry.Square` ⇄ `<root>/geometry/Square.<extension>`
///
/// # Invariants
/// - Pure string transform: never touches the filesystem
/// - Stable and reversible for any convention name or convention path
/// - Non-convention identities/paths pass through unchanged
#[derive(Debug, Clone)]
pub struct NamingScheme {
    /// Directory all convention paths are rooted at.
    root: PathBuf,
    /// Source file extension, without the leading dot.
    extension: String,
}

impl NamingScheme {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Map an identity to its source path.
    ///
    /// Non-convention identities become the path spelled by their name,
    /// unchanged (opaque entries).
    pub fn path_of(&self, id: &Identity) -> PathBuf {
        if !id.is_convention() {
            return PathBuf::from(id.as_str());
        }
        let mut rel = id.as_str().replace('.', "/");
        rel.push('.');
        rel.push_str(&self.extension);
        self.root.join(rel)
    }

    /// Map a source path back to its identity.
    ///
    /// Paths outside the root, with the wrong extension, or with segments
    /// that are not valid name segments pass through as opaque identities.
    pub fn identity_of(&self, path: &Path) -> Identity {
        match self.convention_identity(path) {
            Some(id) => id,
            None => Identity::new(path.display().to_string()),
        }
    }

    fn convention_identity(&self, path: &Path) -> Option<Identity> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let rel = rel.to_str()?;
        let stem = rel.strip_suffix(&format!(".{}", self.extension))?;
        if stem.is_empty() || !stem.split('/').all(is_name_segment) {
            return None;
        }
        Some(Identity::new(stem.replace('/', ".")))
    }
}

impl Default for NamingScheme {
    /// Sources under the current directory with a `cls` extension.
    fn default() -> Self {
        Self::new(".", "cls")
    }
}

/// A convention name is one or more dot-separated valid segments.
fn is_convention_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_name_segment)
}

/// Segments are identifier-shaped: leading letter or underscore, then
/// letters, digits, underscores.
fn is_name_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =============================================================================
// Tests
// =============================================================================
