//! Circular reference guard
//!
//! One guard lives for one top-level serialize call. It holds the identities
//! of the objects on the current descent path: an identity is entered before
//! an object's fields are visited and left once they are done. Meeting an
//! identity that is already on the path means a back-reference to an
//! ancestor, which the caller truncates. The same object reached twice along
//! different branches (a diamond) is not on the path the second time and is
//! serialized in full.

use rustc_hash::FxHashSet;
use strata_client_core::{Instance, ObjectIdentity, Result, SharedObject};
use tracing::debug;

/// Tracks the objects currently being serialized
#[derive(Debug, Default)]
pub struct CycleGuard {
    path: FxHashSet<ObjectIdentity>,
    truncations: usize,
}

impl CycleGuard {
    /// Create an empty guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `id` onto the path; false if it is already there
    pub fn enter(&mut self, id: ObjectIdentity) -> bool {
        self.path.insert(id)
    }

    /// Pop `id` off the path
    pub fn leave(&mut self, id: ObjectIdentity) {
        self.path.remove(&id);
    }

    /// Whether `id` is an ancestor of the current position
    pub fn is_active(&self, id: ObjectIdentity) -> bool {
        self.path.contains(&id)
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Number of back-references truncated so far
    pub fn truncations(&self) -> usize {
        self.truncations
    }

    /// Run `f` on `object` unless it is already on the path
    ///
    /// Returns `Ok(None)` for a back-reference. The identity is left again
    /// whether `f` succeeds or fails.
    pub fn visit<R>(
        &mut self,
        object: &SharedObject,
        f: impl FnOnce(&Instance, &mut CycleGuard) -> Result<R>,
    ) -> Result<Option<R>> {
        let id = object.identity();
        if !self.enter(id) {
            self.truncations += 1;
            debug!(
                "Truncating back-reference to {} at depth {}",
                object.type_name(),
                self.depth()
            );
            return Ok(None);
        }
        let result = {
            let instance = object.read();
            f(&instance, self)
        };
        self.leave(id);
        result.map(Some)
    }
}
