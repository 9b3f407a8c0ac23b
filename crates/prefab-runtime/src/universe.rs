//! Type registration and lookup for the modeled universe.
//!
//! The universe is the engine's structural-introspection capability: it is
//! built once by the caller (well-known types first, then the caller's own
//! schemas), after which the engine only reads it. The exception is static
//! field cells, which are interior-mutable so synthesis can write globals
//! through a shared reference.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use prefab_identity::{FieldId, NameId, NameTable, TypeDefId, TypeIdVec};

use crate::schema::{FieldDef, FieldSpec, TypeDef, TypeKind};
use crate::{Constructors, Value};

/// Ids of the built-in scalar types, registered first in every universe.
#[derive(Debug, Clone, Copy)]
pub struct Primitives {
    pub unit: TypeDefId,
    pub bool: TypeDefId,
    pub i8: TypeDefId,
    pub i16: TypeDefId,
    pub i32: TypeDefId,
    pub i64: TypeDefId,
    pub f32: TypeDefId,
    pub f64: TypeDefId,
    pub string: TypeDefId,
}

#[derive(Debug)]
pub struct Universe {
    names: NameTable,
    type_defs: Vec<TypeDef>,
    type_by_name: FxHashMap<NameId, TypeDefId>,
    /// element type -> array-of-element type
    arrays: FxHashMap<TypeDefId, TypeDefId>,
    /// global cells for static fields, addressed by field id
    statics: FxHashMap<FieldId, RefCell<Value>>,
    constructors: Constructors,
    primitives: Primitives,
    any: TypeDefId,
    wildcard: TypeDefId,
    next_field: u32,
}

impl Universe {
    /// Create a universe with the built-in types registered.
    pub fn new() -> Self {
        let mut u = Self {
            names: NameTable::new(),
            type_defs: Vec::new(),
            type_by_name: FxHashMap::default(),
            arrays: FxHashMap::default(),
            statics: FxHashMap::default(),
            constructors: Constructors::new(),
            // Placeholder ids, fixed up right below once the types exist.
            primitives: Primitives {
                unit: TypeDefId::new(0),
                bool: TypeDefId::new(0),
                i8: TypeDefId::new(0),
                i16: TypeDefId::new(0),
                i32: TypeDefId::new(0),
                i64: TypeDefId::new(0),
                f32: TypeDefId::new(0),
                f64: TypeDefId::new(0),
                string: TypeDefId::new(0),
            },
            any: TypeDefId::new(0),
            wildcard: TypeDefId::new(0),
            next_field: 0,
        };

        u.primitives = Primitives {
            unit: u.register_type("unit", TypeKind::Primitive),
            bool: u.register_type("bool", TypeKind::Primitive),
            i8: u.register_type("i8", TypeKind::Primitive),
            i16: u.register_type("i16", TypeKind::Primitive),
            i32: u.register_type("i32", TypeKind::Primitive),
            i64: u.register_type("i64", TypeKind::Primitive),
            f32: u.register_type("f32", TypeKind::Primitive),
            f64: u.register_type("f64", TypeKind::Primitive),
            string: u.register_type("string", TypeKind::Primitive),
        };
        u.any = u.register_type("any", TypeKind::Any);
        u.wildcard = u.register_type("wildcard", TypeKind::Wildcard);
        u
    }

    pub fn primitives(&self) -> &Primitives {
        &self.primitives
    }

    pub fn any(&self) -> TypeDefId {
        self.any
    }

    pub fn wildcard(&self) -> TypeDefId {
        self.wildcard
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a new type definition under a fully-qualified name.
    pub fn register_type(&mut self, name: &str, kind: TypeKind) -> TypeDefId {
        let name_id = self.names.intern(name);
        if let Some(existing) = self.type_by_name.get(&name_id) {
            tracing::debug!(name, "type already registered, keeping existing id");
            return *existing;
        }
        let id = TypeDefId::new(self.type_defs.len() as u32);
        self.type_defs.push(TypeDef {
            id,
            name: name_id,
            kind,
        });
        self.type_by_name.insert(name_id, id);
        id
    }

    /// Register an enumeration with constants in declaration order.
    pub fn register_enum(&mut self, name: &str, constants: &[&str]) -> TypeDefId {
        self.register_type(
            name,
            TypeKind::Enum {
                constants: constants.iter().map(|c| c.to_string()).collect(),
            },
        )
    }

    /// Register (or fetch) the array type of the given element type.
    pub fn register_array_of(&mut self, elem: TypeDefId) -> TypeDefId {
        if let Some(existing) = self.arrays.get(&elem) {
            return *existing;
        }
        let elem_name = self.names.resolve(self.type_defs[elem.index() as usize].name);
        let name = format!("{elem_name}[]");
        let id = self.register_type(&name, TypeKind::Array { elem });
        self.arrays.insert(elem, id);
        id
    }

    /// Register a generic container type with the given arity. Containers
    /// are synthesized through a registered factory, not by field traversal.
    pub fn register_container(&mut self, name: &str, params: usize) -> TypeDefId {
        self.register_type(name, TypeKind::Container { params })
    }

    /// Declare a plain object type with no fields yet. Needed for
    /// self-referential and mutually recursive shapes, whose field types must
    /// exist before the fields can be declared.
    pub fn declare_object(&mut self, name: &str) -> TypeDefId {
        self.register_type(
            name,
            TypeKind::Object {
                fields: Vec::new(),
                implements: TypeIdVec::new(),
            },
        )
    }

    /// Append declared fields to an object type, allocating field ids and
    /// global cells for static fields. Ignored for non-object kinds.
    pub fn add_fields(&mut self, ty: TypeDefId, fields: Vec<FieldSpec>) {
        let mut defs = Vec::with_capacity(fields.len());
        for spec in fields {
            let id = FieldId::new(self.next_field);
            self.next_field += 1;
            if spec.is_static {
                let initial = spec.initial.unwrap_or(Value::Unit);
                self.statics.insert(id, RefCell::new(initial));
            }
            defs.push(FieldDef {
                id,
                name: spec.name,
                ty: spec.ty,
                is_static: spec.is_static,
                is_final: spec.is_final,
            });
        }
        match &mut self.type_defs[ty.index() as usize].kind {
            TypeKind::Object { fields, .. } => fields.extend(defs),
            _ => tracing::debug!(ty = ?ty, "add_fields on non-object type ignored"),
        }
    }

    /// Register a plain object type with its declared fields.
    pub fn register_object(&mut self, name: &str, fields: Vec<FieldSpec>) -> TypeDefId {
        self.register_object_implementing(name, fields, &[])
    }

    /// Register a plain object type that declares interface implementations.
    pub fn register_object_implementing(
        &mut self,
        name: &str,
        fields: Vec<FieldSpec>,
        implements: &[TypeDefId],
    ) -> TypeDefId {
        let ty = self.declare_object(name);
        self.add_fields(ty, fields);
        if let TypeKind::Object {
            implements: decl, ..
        } = &mut self.type_defs[ty.index() as usize].kind
        {
            decl.extend(implements.iter().copied());
        }
        ty
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve a fully-qualified name to a type, if it exists in this
    /// environment.
    pub fn resolve(&self, name: &str) -> Option<TypeDefId> {
        self.names
            .get(name)
            .and_then(|name_id| self.type_by_name.get(&name_id).copied())
    }

    pub fn name_of(&self, ty: TypeDefId) -> &str {
        self.names.resolve(self.type_defs[ty.index() as usize].name)
    }

    pub fn kind_of(&self, ty: TypeDefId) -> &TypeKind {
        &self.type_defs[ty.index() as usize].kind
    }

    /// Declared fields of an object type; empty for every other kind.
    pub fn fields_of(&self, ty: TypeDefId) -> &[FieldDef] {
        match self.kind_of(ty) {
            TypeKind::Object { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn enum_constants(&self, ty: TypeDefId) -> Option<&[String]> {
        match self.kind_of(ty) {
            TypeKind::Enum { constants } => Some(constants),
            _ => None,
        }
    }

    pub fn array_elem(&self, ty: TypeDefId) -> Option<TypeDefId> {
        match self.kind_of(ty) {
            TypeKind::Array { elem } => Some(*elem),
            _ => None,
        }
    }

    /// Whether a value of type `from` can stand in for type `to`.
    pub fn assignable(&self, from: TypeDefId, to: TypeDefId) -> bool {
        if from == to || to == self.any {
            return true;
        }
        match self.kind_of(from) {
            TypeKind::Object { implements, .. } => implements.contains(&to),
            _ => false,
        }
    }

    /// Recover the runtime type of a value. `None` only for an array whose
    /// element type never had its array type registered.
    pub fn type_of(&self, value: &Value) -> Option<TypeDefId> {
        let p = &self.primitives;
        Some(match value {
            Value::Unit => p.unit,
            Value::Bool(_) => p.bool,
            Value::I8(_) => p.i8,
            Value::I16(_) => p.i16,
            Value::I32(_) => p.i32,
            Value::I64(_) => p.i64,
            Value::F32(_) => p.f32,
            Value::F64(_) => p.f64,
            Value::Str(_) => p.string,
            Value::Token(_) => self.any,
            Value::Enum { ty, .. } => *ty,
            Value::Array { elem, .. } => return self.arrays.get(elem).copied(),
            Value::Seq { ty, .. } => *ty,
            Value::Map { ty, .. } => *ty,
            Value::Object { ty, .. } => *ty,
        })
    }

    // ========================================================================
    // Globals and construction
    // ========================================================================

    /// Read a static field's global cell.
    pub fn static_get(&self, field: FieldId) -> Option<Value> {
        self.statics.get(&field).map(|cell| cell.borrow().clone())
    }

    /// Write a static field's global cell. Unknown ids are ignored.
    pub fn static_set(&self, field: FieldId, value: Value) {
        if let Some(cell) = self.statics.get(&field) {
            *cell.borrow_mut() = value;
        } else {
            tracing::trace!(?field, "static_set on unknown field cell");
        }
    }

    /// Build an object instance from pre-computed instance field values.
    pub fn instantiate(&self, ty: TypeDefId, fields: Vec<(FieldId, Value)>) -> Value {
        Value::Object { ty, fields }
    }

    pub fn constructors(&self) -> &Constructors {
        &self.constructors
    }

    pub fn constructors_mut(&mut self) -> &mut Constructors {
        &mut self.constructors
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_registers_builtins() {
        let u = Universe::new();
        assert_eq!(u.resolve("i32"), Some(u.primitives().i32));
        assert_eq!(u.resolve("any"), Some(u.any()));
        assert_eq!(u.resolve("wildcard"), Some(u.wildcard()));
        assert_eq!(u.resolve("std.List"), None);
    }

    #[test]
    fn register_and_resolve_is_idempotent() {
        let mut u = Universe::new();
        let a = u.register_container("std.List", 1);
        let b = u.register_container("std.List", 1);
        assert_eq!(a, b);
        assert_eq!(u.resolve("std.List"), Some(a));
        assert_eq!(u.name_of(a), "std.List");
    }

    #[test]
    fn enum_constants_in_declaration_order() {
        let mut u = Universe::new();
        let color = u.register_enum("demo.Color", &["A", "B", "C"]);
        assert_eq!(
            u.enum_constants(color).unwrap(),
            &["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn array_registration_is_idempotent() {
        let mut u = Universe::new();
        let i32_ty = u.primitives().i32;
        let a = u.register_array_of(i32_ty);
        let b = u.register_array_of(i32_ty);
        assert_eq!(a, b);
        assert_eq!(u.array_elem(a), Some(i32_ty));
        assert_eq!(u.name_of(a), "i32[]");
    }

    #[test]
    fn static_cells_read_and_write() {
        let mut u = Universe::new();
        let i32_ty = u.primitives().i32;
        let ty = u.register_object(
            "demo.Counter",
            vec![FieldSpec::global("total", i32_ty, Value::I32(0))],
        );
        let field = u.fields_of(ty)[0].id;
        assert_eq!(u.static_get(field), Some(Value::I32(0)));
        u.static_set(field, Value::I32(7));
        assert_eq!(u.static_get(field), Some(Value::I32(7)));
    }

    #[test]
    fn assignability() {
        let mut u = Universe::new();
        let iface = u.register_object("demo.Greeter", vec![]);
        let impl_ty = u.register_object_implementing("demo.GreeterImpl", vec![], &[iface]);
        let other = u.register_object("demo.Other", vec![]);
        assert!(u.assignable(impl_ty, iface));
        assert!(u.assignable(impl_ty, u.any()));
        assert!(u.assignable(iface, iface));
        assert!(!u.assignable(other, iface));
    }

    #[test]
    fn type_of_values() {
        let mut u = Universe::new();
        let i32_ty = u.primitives().i32;
        let arr_ty = u.register_array_of(i32_ty);
        assert_eq!(u.type_of(&Value::I32(1)), Some(i32_ty));
        assert_eq!(u.type_of(&Value::Token(0)), Some(u.any()));
        assert_eq!(
            u.type_of(&Value::Array {
                elem: i32_ty,
                items: vec![Value::I32(1)],
            }),
            Some(arr_ty)
        );
    }
}
