//! Shared interning for fully-qualified type names.
//!
//! Names are dotted paths like `std.List` or `ext.Zone`. Interning gives
//! every distinct name a stable `NameId` so the rest of the system compares
//! ids instead of strings. Lookup by string returns `None` for names that
//! were never interned; it never errors.

use rustc_hash::FxHashMap;

use crate::NameId;

#[derive(Debug, Default, Clone)]
pub struct NameTable {
    names: Vec<String>,
    lookup: FxHashMap<String, NameId>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a fully-qualified name, returning the existing id if the name
    /// was seen before.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(id) = self.lookup.get(name) {
            return *id;
        }
        let id = NameId::new(self.names.len() as u32);
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Look up a previously interned name.
    pub fn get(&self, name: &str) -> Option<NameId> {
        self.lookup.get(name).copied()
    }

    /// Resolve an id back to its name.
    pub fn resolve(&self, id: NameId) -> &str {
        &self.names[id.index() as usize]
    }

    /// The segment after the last dot, for display purposes.
    pub fn short_name(&self, id: NameId) -> &str {
        let full = self.resolve(id);
        full.rsplit('.').next().unwrap_or(full)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
