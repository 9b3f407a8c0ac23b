//! Snapshot and restore of global (static) field state.
//!
//! Synthesis writes prefab values into static non-final fields, so every type
//! is snapshotted before it is touched. The stash stays valid after a run
//! that aborted with an error; `restore_all` can always be called once at the
//! end.

use rustc_hash::FxHashMap;

use prefab_identity::{FieldId, TypeDefId};
use prefab_runtime::{Universe, Value};

#[derive(Debug, Default)]
pub struct StaticStash {
    stash: FxHashMap<TypeDefId, FxHashMap<FieldId, Value>>,
}

impl StaticStash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current values of all static fields of `ty`. A second call
    /// for the same type is a no-op, so later mutations never overwrite the
    /// original snapshot.
    pub fn backup(&mut self, universe: &Universe, ty: TypeDefId) {
        if self.stash.contains_key(&ty) {
            return;
        }
        let mut saved = FxHashMap::default();
        for field in universe.fields_of(ty) {
            if field.is_static {
                if let Some(value) = universe.static_get(field.id) {
                    saved.insert(field.id, value);
                }
            }
        }
        tracing::trace!(ty = universe.name_of(ty), fields = saved.len(), "stashed statics");
        self.stash.insert(ty, saved);
    }

    /// Write every recorded value back onto its global cell. Order-independent
    /// because each snapshot was taken before its type was first touched.
    pub fn restore_all(&self, universe: &Universe) {
        for saved in self.stash.values() {
            for (field, value) in saved {
                universe.static_set(*field, value.clone());
            }
        }
    }

    pub fn backed_up(&self, ty: TypeDefId) -> bool {
        self.stash.contains_key(&ty)
    }
}
