//! Type schemas: the structural description of each type in the universe.
//!
//! Schemas carry exactly what the synthesis engine needs to traverse a type:
//! its kind, its declared fields with static/final modifiers, enum constants
//! in declaration order, and array element types. They are built once during
//! universe construction and never mutated afterwards.

use prefab_identity::{FieldId, NameId, TypeDefId, TypeIdVec};

use crate::Value;

/// A declared field, with enough metadata to know how to traverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub id: FieldId,
    pub name: String,
    pub ty: TypeDefId,
    pub is_static: bool,
    pub is_final: bool,
}

/// Caller-side description of a field, before the universe allocates its id.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeDefId,
    pub is_static: bool,
    pub is_final: bool,
    /// Current value of a static field's global cell. Ignored for instance
    /// fields.
    pub initial: Option<Value>,
}

impl FieldSpec {
    /// An ordinary instance field.
    pub fn instance(name: &str, ty: TypeDefId) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_static: false,
            is_final: false,
            initial: None,
        }
    }

    /// A globally-shared mutable field with its current value.
    pub fn global(name: &str, ty: TypeDefId, initial: Value) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_static: true,
            is_final: false,
            initial: Some(initial),
        }
    }

    /// A globally-shared immutable constant.
    pub fn global_const(name: &str, ty: TypeDefId, initial: Value) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_static: true,
            is_final: true,
            initial: Some(initial),
        }
    }
}

/// What kind of type a definition describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A built-in scalar; never synthesized, only seeded.
    Primitive,
    /// The universal top type.
    Any,
    /// Marker standing in for an unbounded generic argument.
    Wildcard,
    /// An enumeration with constants in declaration order.
    Enum { constants: Vec<String> },
    /// An array of a fixed element type.
    Array { elem: TypeDefId },
    /// A generic container handled by a registered factory.
    Container { params: usize },
    /// Everything else: a plain object with declared fields.
    Object {
        fields: Vec<FieldDef>,
        implements: TypeIdVec,
    },
}

/// A type definition registered in the universe.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub id: TypeDefId,
    pub name: NameId,
    pub kind: TypeKind,
}
