//! Storage for synthesized red/black tuples and registered factories.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use prefab_identity::TypeDefId;
use prefab_runtime::Value;

use crate::factory::PrefabFactory;
use crate::TypeTag;

/// An ordered pair of same-typed values. For every type with more than one
/// distinguishable value, `red` and `black` are never equal; the single
/// exception is a one-constant enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    red: Value,
    black: Value,
}

impl Tuple {
    pub fn new(red: Value, black: Value) -> Self {
        Self { red, black }
    }

    pub fn red(&self) -> &Value {
        &self.red
    }

    pub fn black(&self) -> &Value {
        &self.black
    }
}

/// Memoized tuples keyed by tag, plus the generic-factory registrations.
///
/// Entries are created at most once per tag and immutable afterwards, except
/// through an explicit overwriting [`put`](PrefabStore::put).
#[derive(Default)]
pub struct PrefabStore {
    tuples: FxHashMap<TypeTag, Tuple>,
    factories: FxHashMap<TypeDefId, Rc<dyn PrefabFactory>>,
}

impl PrefabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a red/black pair with a tag, overwriting any existing entry.
    pub fn put(&mut self, tag: TypeTag, red: Value, black: Value) {
        self.tuples.insert(tag, Tuple::new(red, black));
    }

    /// Copy every tuple of another store into this one.
    pub fn put_all(&mut self, from: &PrefabStore) {
        for (tag, tuple) in &from.tuples {
            self.tuples.insert(tag.clone(), tuple.clone());
        }
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.tuples.contains_key(tag)
    }

    pub fn tuple(&self, tag: &TypeTag) -> Option<&Tuple> {
        self.tuples.get(tag)
    }

    /// Register a generic-type factory for a raw type, overwriting any
    /// previous registration.
    pub fn add_factory(&mut self, raw: TypeDefId, factory: Rc<dyn PrefabFactory>) {
        self.factories.insert(raw, factory);
    }

    pub fn factory(&self, raw: TypeDefId) -> Option<Rc<dyn PrefabFactory>> {
        self.factories.get(&raw).cloned()
    }
}

impl std::fmt::Debug for PrefabStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefabStore")
            .field("tuples", &self.tuples.len())
            .field("factories", &self.factories.len())
            .finish()
    }
}
