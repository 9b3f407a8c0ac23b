//! Prefab value synthesis for contract-verification fixtures.
//!
//! Facade over the workspace crates: build a [`Universe`] describing the
//! types under test, wrap it in a [`PrefabValues`] engine, seed it with
//! [`builtins::seed`], and ask for red/black sample instances by [`TypeTag`].

pub use prefab_engine::{
    builtins, ConditionalBuilder, MapFactory, PrefabError, PrefabFactory, PrefabStore,
    PrefabValues, SequenceFactory, StaticStash, SyncCellFactory, Tuple, TypeTag,
};
pub use prefab_identity::{FieldId, NameId, NameTable, TypeDefId, TypeIdVec};
pub use prefab_runtime::{
    Constructors, CtorFn, FieldDef, FieldSpec, Primitives, TypeDef, TypeKind, Universe, Value,
};
