//! Dependency closure computation.
//!
//! Given a changed module, walks the host's live type relationships to find
//! every module that must be unloaded and reloaded with it:
//!
//! - class → direct subclasses (each subtree fully expanded, in order)
//! - metaclass-capable class → classes instancing it, after every subclass
//! - role → consuming classes/roles, in registration order
//!
//! The graph is queried transiently through [`Runtime`] and never cached;
//! it can change after every reload.

use rustc_hash::FxHashSet;

use crate::error::RefreshError;
use crate::identity::Identity;
use crate::runtime::{Runtime, TypeKind};

/// Ordered closure of modules to unload-then-reload together.
///
/// Depth-first preorder, the module itself first. Implemented as an explicit
/// worklist rather than recursion, with a visited set doubling as the cycle
/// guard.
///
/// # Duplicate policy
/// Diamonds in the dependency graph are deduplicated here: each identity
/// appears at most once, at the position of its first (leftmost) visit, so
/// the loader boundary never sees redundant unload/reload pairs within one
/// refresh.
pub fn closure_of(runtime: &impl Runtime, id: &Identity) -> Result<Vec<Identity>, RefreshError> {
    // Hosts without reflective metadata have no dependency information.
    if !runtime.is_reflective() {
        return Ok(vec![id.clone()]);
    }

    let mut ordered = Vec::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![id.clone()];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let dependents = direct_dependents(runtime, &current)?;
        ordered.push(current);
        // Reverse push keeps preorder: the first dependent's subtree is
        // fully expanded before its siblings.
        for dep in dependents.into_iter().rev() {
            stack.push(dep);
        }
    }

    Ok(ordered)
}

/// Direct dependents of one identity, in refresh order.
fn direct_dependents(
    runtime: &impl Runtime,
    id: &Identity,
) -> Result<Vec<Identity>, RefreshError> {
    match runtime.kind_of(id) {
        TypeKind::Unreflective => Ok(Vec::new()),
        TypeKind::Class { metaclass } => {
            let mut deps = runtime.subclasses_of(id);
            // Metaclass changes are coarser-grained: classes instancing the
            // metaclass go after every subclass in the batch.
            if metaclass {
                deps.extend(runtime.metaclass_instances_of(id));
            }
            Ok(deps)
        }
        TypeKind::Role => Ok(runtime.consumers_of(id)),
        TypeKind::Unknown => Err(RefreshError::UnknownMetaclass {
            identity: id.clone(),
        }),
    }
}
