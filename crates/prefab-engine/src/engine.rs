//! Container and creator of prefabricated instances.
//!
//! One `PrefabValues` instance is scoped to a single verification run: the
//! caller builds it from a frozen universe, optionally seeds it (see
//! [`crate::builtins`]), runs the verification, then restores global state
//! from the stash and discards the engine.

use std::rc::Rc;

use prefab_runtime::{Universe, Value};

use prefab_identity::TypeDefId;

use crate::factory::PrefabFactory;
use crate::stash::StaticStash;
use crate::store::PrefabStore;
use crate::{PrefabError, TypeTag};

pub struct PrefabValues {
    pub(crate) universe: Rc<Universe>,
    pub(crate) store: PrefabStore,
    pub(crate) stash: StaticStash,
}

impl PrefabValues {
    pub fn new(universe: Rc<Universe>) -> Self {
        Self {
            universe,
            store: PrefabStore::new(),
            stash: StaticStash::new(),
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn universe_rc(&self) -> Rc<Universe> {
        self.universe.clone()
    }

    // ========================================================================
    // Store operations
    // ========================================================================

    /// Associate a red/black pair with a tag, overwriting any existing entry.
    /// Also the escape hatch for cyclic type graphs: pre-registering one type
    /// of a cycle lets synthesis of the others succeed.
    pub fn put(&mut self, tag: TypeTag, red: Value, black: Value) {
        self.store.put(tag, red, black);
    }

    /// Copy every stored tuple of another engine into this one.
    pub fn put_all(&mut self, from: &PrefabValues) {
        self.store.put_all(&from.store);
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.store.contains(tag)
    }

    /// Register a generic-type factory for a raw type.
    pub fn add_factory(&mut self, raw: TypeDefId, factory: impl PrefabFactory + 'static) {
        self.store.add_factory(raw, Rc::new(factory));
    }

    // ========================================================================
    // Value access
    // ========================================================================

    /// The red prefab value for a tag, synthesizing it first if necessary.
    pub fn red(&mut self, tag: &TypeTag) -> Result<Value, PrefabError> {
        self.synthesize(tag)?;
        self.stored_red(tag)
    }

    /// The black prefab value for a tag, synthesizing it first if necessary.
    pub fn black(&mut self, tag: &TypeTag) -> Result<Value, PrefabError> {
        self.synthesize(tag)?;
        self.stored_black(tag)
    }

    /// The stored red value, without triggering synthesis. Factories use this
    /// after the synthesizer has prepared their argument tags; a miss here
    /// means the engine was mis-assembled.
    pub fn stored_red(&self, tag: &TypeTag) -> Result<Value, PrefabError> {
        match self.store.tuple(tag) {
            Some(tuple) => Ok(tuple.red().clone()),
            None => Err(self.missing(tag)),
        }
    }

    /// The stored black value, without triggering synthesis.
    pub fn stored_black(&self, tag: &TypeTag) -> Result<Value, PrefabError> {
        match self.store.tuple(tag) {
            Some(tuple) => Ok(tuple.black().clone()),
            None => Err(self.missing(tag)),
        }
    }

    fn missing(&self, tag: &TypeTag) -> PrefabError {
        PrefabError::Bug {
            detail: format!(
                "no prefab values stored for {}",
                tag.display(&self.universe)
            ),
        }
    }

    /// A prefab value of the tag's type guaranteed not to equal `value`.
    ///
    /// `None` is unequal to everything, so it yields red. A `Some` value of
    /// an incompatible runtime type is a [`PrefabError::TypeMismatch`].
    /// Otherwise the comparison is deep: a value equal to the stored red
    /// yields black, anything else (including a value equal to neither)
    /// yields red.
    pub fn other(&mut self, tag: &TypeTag, value: Option<&Value>) -> Result<Value, PrefabError> {
        let universe = self.universe_rc();
        let Some(value) = value else {
            return self.red(tag);
        };

        let found = universe.type_of(value);
        let compatible = found.is_some_and(|ft| universe.assignable(ft, tag.raw()));
        if !compatible {
            return Err(PrefabError::TypeMismatch {
                expected: tag.display(&universe),
                found: found
                    .map(|ft| universe.name_of(ft).to_string())
                    .unwrap_or_else(|| "unregistered array type".to_string()),
            });
        }

        let red = self.red(tag)?;
        if *value == red {
            self.stored_black(tag)
        } else {
            Ok(red)
        }
    }

    // ========================================================================
    // Stash
    // ========================================================================

    /// Back up the global fields of the tag's raw type. No-op if that type
    /// was already stashed.
    pub fn backup_to_stash(&mut self, tag: &TypeTag) {
        let universe = self.universe_rc();
        self.stash.backup(&universe, tag.raw());
    }

    /// Restore every global field touched during this run. Safe to call once
    /// at the end, including after an error aborted synthesis partway.
    pub fn restore_from_stash(&self) {
        self.stash.restore_all(&self.universe);
    }
}

impl std::fmt::Debug for PrefabValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefabValues")
            .field("store", &self.store)
            .field("stash", &self.stash)
            .finish_non_exhaustive()
    }
}
