//! Generic-type factories: pluggable generators for container types.
//!
//! A factory produces red and black instances of its raw type by drawing
//! already-synthesized values for the tag's generic arguments from the
//! engine. The synthesizer guarantees every argument tag is synthesized
//! before the factory runs, so factories only do stored lookups.

use prefab_runtime::Value;

use prefab_identity::TypeDefId;

use crate::{PrefabError, PrefabValues, TypeTag};

pub trait PrefabFactory {
    /// A fresh, empty instance of the raw type.
    fn create_empty(&self) -> Value;

    /// An instance populated with red values for the tag's arguments.
    fn create_red(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError>;

    /// An instance populated with black values for the tag's arguments.
    fn create_black(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError>;
}

/// Factory for single-parameter sequence containers (list- and set-likes).
/// The element type is argument 0; a missing or wildcard argument falls back
/// to the top type.
pub struct SequenceFactory {
    ty: TypeDefId,
}

impl SequenceFactory {
    pub fn new(ty: TypeDefId) -> Self {
        Self { ty }
    }
}

impl PrefabFactory for SequenceFactory {
    fn create_empty(&self) -> Value {
        Value::Seq {
            ty: self.ty,
            items: Vec::new(),
        }
    }

    fn create_red(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let elem = tag.arg_or_any(0, values.universe());
        let mut result = self.create_empty();
        if let Value::Seq { items, .. } = &mut result {
            items.push(values.stored_red(&elem)?);
        }
        Ok(result)
    }

    fn create_black(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let elem = tag.arg_or_any(0, values.universe());
        let mut result = self.create_empty();
        if let Value::Seq { items, .. } = &mut result {
            items.push(values.stored_black(&elem)?);
        }
        Ok(result)
    }
}

/// Factory for two-parameter map containers. The red map pairs a red key with
/// a *black* value so that key and value never collide when the two argument
/// types coincide; the black map pairs a black key with a black value.
pub struct MapFactory {
    ty: TypeDefId,
}

impl MapFactory {
    pub fn new(ty: TypeDefId) -> Self {
        Self { ty }
    }
}

impl PrefabFactory for MapFactory {
    fn create_empty(&self) -> Value {
        Value::Map {
            ty: self.ty,
            entries: Vec::new(),
        }
    }

    fn create_red(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let key_tag = tag.arg_or_any(0, values.universe());
        let value_tag = tag.arg_or_any(1, values.universe());
        let mut result = self.create_empty();
        if let Value::Map { entries, .. } = &mut result {
            entries.push((values.stored_red(&key_tag)?, values.stored_black(&value_tag)?));
        }
        Ok(result)
    }

    fn create_black(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let key_tag = tag.arg_or_any(0, values.universe());
        let value_tag = tag.arg_or_any(1, values.universe());
        let mut result = self.create_empty();
        if let Value::Map { entries, .. } = &mut result {
            entries.push((
                values.stored_black(&key_tag)?,
                values.stored_black(&value_tag)?,
            ));
        }
        Ok(result)
    }
}

/// Bespoke factory for the single-slot blocking cell, whose one type argument
/// fills both the key and the element role. The element/key-value defaults
/// don't fit, so red and black are built directly.
pub struct SyncCellFactory {
    ty: TypeDefId,
}

impl SyncCellFactory {
    pub fn new(ty: TypeDefId) -> Self {
        Self { ty }
    }

    fn slot(&self, value: Value) -> Value {
        Value::Map {
            ty: self.ty,
            entries: vec![(value.clone(), value)],
        }
    }
}

impl PrefabFactory for SyncCellFactory {
    fn create_empty(&self) -> Value {
        Value::Map {
            ty: self.ty,
            entries: Vec::new(),
        }
    }

    fn create_red(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let arg = tag.arg_or_any(0, values.universe());
        Ok(self.slot(values.stored_red(&arg)?))
    }

    fn create_black(&self, tag: &TypeTag, values: &PrefabValues) -> Result<Value, PrefabError> {
        let arg = tag.arg_or_any(0, values.universe());
        Ok(self.slot(values.stored_black(&arg)?))
    }
}
