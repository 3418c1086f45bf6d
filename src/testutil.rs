//! In-memory host runtime used by unit and scenario tests.
//!
//! Class sources are one declaration per file:
//!
//! ```text
//! class geometry.Square : geometry.Shape with util.Printable meta meta.Strict
//! meth area
//! meth perimeter
//! ```
//!
//! Header keywords are `class`, `role` and `metaclass`; anything else is a
//! parse error, which surfaces as a load failure.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::error::LoadError;
use crate::identity::{Identity, NamingScheme};
use crate::runtime::{Runtime, TypeKind};

// =============================================================================
// Definitions
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefKind {
    #[default]
    Class,
    Metaclass,
    Role,
}

/// A parsed class/role definition living in the fake runtime.
#[derive(Debug, Clone, Default)]
pub struct ClassDef {
    pub kind: DefKind,
    pub parent: Option<Identity>,
    pub roles: Vec<Identity>,
    pub metaclass: Option<Identity>,
    pub methods: Vec<String>,
}

impl ClassDef {
    pub fn class() -> Self {
        Self::default()
    }

    pub fn role() -> Self {
        Self {
            kind: DefKind::Role,
            ..Self::default()
        }
    }

    pub fn metaclass() -> Self {
        Self {
            kind: DefKind::Metaclass,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, name: &str) -> Self {
        self.parent = Some(Identity::new(name));
        self
    }

    pub fn with_role(mut self, name: &str) -> Self {
        self.roles.push(Identity::new(name));
        self
    }

    pub fn with_metaclass(mut self, name: &str) -> Self {
        self.metaclass = Some(Identity::new(name));
        self
    }

    pub fn with_meth(mut self, name: &str) -> Self {
        self.methods.push(name.to_string());
        self
    }
}

/// Parse a source file into its declared identity and definition.
fn parse_def(src: &str) -> Result<(Identity, ClassDef), String> {
    let mut lines = src
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let header = lines.next().ok_or("empty source")?;
    let mut tokens = header.split_whitespace();

    let kind = match tokens.next() {
        Some("class") => DefKind::Class,
        Some("metaclass") => DefKind::Metaclass,
        Some("role") => DefKind::Role,
        Some(other) => return Err(format!("unknown declaration keyword `{other}`")),
        None => return Err("empty declaration".into()),
    };
    let name = tokens.next().ok_or("declaration without a name")?;

    let mut def = ClassDef {
        kind,
        ..ClassDef::default()
    };
    let mut clause = "";
    for token in tokens {
        match token {
            ":" | "with" | "meta" => clause = token,
            _ => match clause {
                ":" => def.parent = Some(Identity::new(token)),
                "with" => def.roles.push(Identity::new(token)),
                "meta" => def.metaclass = Some(Identity::new(token)),
                _ => return Err(format!("unexpected token `{token}` in declaration")),
            },
        }
    }

    for line in lines {
        match line.strip_prefix("meth ") {
            Some(name) => def.methods.push(name.trim().to_string()),
            None => return Err(format!("unexpected line `{line}`")),
        }
    }

    Ok((Identity::new(name), def))
}

// =============================================================================
// FakeRuntime
// =============================================================================

/// Calls observed at the loader boundary, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loaded(Identity),
    Unloaded(Identity),
}

/// An in-memory class runtime backed by source files under the scheme root.
///
/// Definitions keep registration order, so registry queries are
/// deterministic the way the real host contract requires.
pub struct FakeRuntime {
    scheme: NamingScheme,
    defs: Vec<(Identity, ClassDef)>,
    loaded: Vec<PathBuf>,
    reflective: bool,
    /// Simulate an unloader that leaves the descriptor registration behind.
    pub sloppy_unloader: bool,
    forced_unknown: FxHashSet<Identity>,
    pub events: Vec<Event>,
}

impl FakeRuntime {
    pub fn new(scheme: NamingScheme) -> Self {
        Self {
            scheme,
            defs: Vec::new(),
            loaded: Vec::new(),
            reflective: true,
            sloppy_unloader: false,
            forced_unknown: FxHashSet::default(),
            events: Vec::new(),
        }
    }

    /// Runtime for tests that never touch the filesystem.
    pub fn in_memory() -> Self {
        Self::new(NamingScheme::default())
    }

    /// Register a definition directly, bypassing the loader.
    pub fn define(&mut self, name: &str, def: ClassDef) {
        let id = Identity::new(name);
        self.remove_def(&id);
        self.defs.push((id, def));
    }

    /// Force `kind_of` to report an unrecognized descriptor kind.
    pub fn force_unknown(&mut self, name: &str) {
        self.forced_unknown.insert(Identity::new(name));
    }

    pub fn set_reflective(&mut self, reflective: bool) {
        self.reflective = reflective;
    }

    pub fn has(&self, name: &str) -> bool {
        let id = Identity::new(name);
        self.defs.iter().any(|(i, _)| *i == id)
    }

    pub fn def_of(&self, name: &str) -> Option<&ClassDef> {
        let id = Identity::new(name);
        self.defs.iter().find(|(i, _)| *i == id).map(|(_, d)| d)
    }

    pub fn methods_of(&self, name: &str) -> Vec<String> {
        self.def_of(name).map(|d| d.methods.clone()).unwrap_or_default()
    }

    /// Drain the event log for ordering assertions.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn remove_def(&mut self, id: &Identity) {
        self.defs.retain(|(i, _)| i != id);
    }
}

impl Runtime for FakeRuntime {
    fn loaded_paths(&self) -> Vec<PathBuf> {
        self.loaded.clone()
    }

    fn is_loaded(&self, path: &Path) -> bool {
        self.loaded.iter().any(|p| p == path)
    }

    fn load(&mut self, id: &Identity) -> Result<(), LoadError> {
        let path = self.scheme.path_of(id);
        let src = fs::read_to_string(&path).map_err(anyhow::Error::from)?;
        let (name, def) = parse_def(&src).map_err(LoadError::msg)?;
        if name != *id {
            return Err(LoadError::msg(format!(
                "source declares `{name}`, expected `{id}`"
            )));
        }

        self.remove_def(id);
        self.defs.push((id.clone(), def));
        if !self.is_loaded(&path) {
            self.loaded.push(path);
        }
        self.events.push(Event::Loaded(id.clone()));
        Ok(())
    }

    fn unload(&mut self, id: &Identity) {
        self.events.push(Event::Unloaded(id.clone()));
        let path = self.scheme.path_of(id);
        self.loaded.retain(|p| p != &path);
        if !self.sloppy_unloader {
            self.remove_def(id);
        }
    }

    fn is_reflective(&self) -> bool {
        self.reflective
    }

    fn kind_of(&self, id: &Identity) -> TypeKind {
        if self.forced_unknown.contains(id) {
            return TypeKind::Unknown;
        }
        match self.defs.iter().find(|(i, _)| i == id) {
            None => TypeKind::Unreflective,
            Some((_, def)) => match def.kind {
                DefKind::Class => TypeKind::Class { metaclass: false },
                DefKind::Metaclass => TypeKind::Class { metaclass: true },
                DefKind::Role => TypeKind::Role,
            },
        }
    }

    fn subclasses_of(&self, id: &Identity) -> Vec<Identity> {
        self.defs
            .iter()
            .filter(|(_, d)| d.parent.as_ref() == Some(id))
            .map(|(i, _)| i.clone())
            .collect()
    }

    fn consumers_of(&self, id: &Identity) -> Vec<Identity> {
        self.defs
            .iter()
            .filter(|(_, d)| d.roles.contains(id))
            .map(|(i, _)| i.clone())
            .collect()
    }

    fn metaclass_instances_of(&self, id: &Identity) -> Vec<Identity> {
        self.defs
            .iter()
            .filter(|(_, d)| d.metaclass.as_ref() == Some(id))
            .map(|(i, _)| i.clone())
            .collect()
    }

    fn remove_descriptor(&mut self, id: &Identity) {
        self.remove_def(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_header() {
        let (name, def) = parse_def(
            "class geometry.Square : geometry.Shape with util.Printable meta meta.Strict\nmeth area\n",
        )
        .unwrap();
        assert_eq!(name, Identity::new("geometry.Square"));
        assert_eq!(def.kind, DefKind::Class);
        assert_eq!(def.parent, Some(Identity::new("geometry.Shape")));
        assert_eq!(def.roles, vec![Identity::new("util.Printable")]);
        assert_eq!(def.metaclass, Some(Identity::new("meta.Strict")));
        assert_eq!(def.methods, vec!["area".to_string()]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_def("clazz Foo").is_err());
        assert!(parse_def("").is_err());
        assert!(parse_def("class Foo\nnot a method line").is_err());
    }
}
