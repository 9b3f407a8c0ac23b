//! Registry for dynamic construction capabilities.
//!
//! Each type in the universe may expose constructors, named static factory
//! methods, and named public constants. Lookups return `None` for anything
//! that was never registered; absence is an expected outcome, not an error,
//! which is what lets optional-integration probing stay silent.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use prefab_identity::{TypeDefId, TypeIdVec};

use crate::Value;

/// A registered construction function. Arguments arrive pre-checked against
/// the parameter types the function was registered under.
pub type CtorFn = Rc<dyn Fn(&[Value]) -> Value>;

#[derive(Clone)]
struct Overload {
    params: TypeIdVec,
    call: CtorFn,
}

impl std::fmt::Debug for Overload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overload")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// All construction capabilities, grouped per owning type.
#[derive(Debug, Default)]
pub struct Constructors {
    ctors: FxHashMap<TypeDefId, Vec<Overload>>,
    statics: FxHashMap<(TypeDefId, String), Vec<Overload>>,
    constants: FxHashMap<(TypeDefId, String), Value>,
}

impl Constructors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor overload for `ty`.
    pub fn register_ctor(
        &mut self,
        ty: TypeDefId,
        params: impl Into<TypeIdVec>,
        call: impl Fn(&[Value]) -> Value + 'static,
    ) {
        self.ctors.entry(ty).or_default().push(Overload {
            params: params.into(),
            call: Rc::new(call),
        });
    }

    /// Register a static factory method overload on `ty`.
    pub fn register_static(
        &mut self,
        ty: TypeDefId,
        name: &str,
        params: impl Into<TypeIdVec>,
        call: impl Fn(&[Value]) -> Value + 'static,
    ) {
        self.statics
            .entry((ty, name.to_string()))
            .or_default()
            .push(Overload {
                params: params.into(),
                call: Rc::new(call),
            });
    }

    /// Register a named public constant on `ty`.
    pub fn register_constant(&mut self, ty: TypeDefId, name: &str, value: Value) {
        self.constants.insert((ty, name.to_string()), value);
    }

    /// Look up a constructor overload by exact parameter types.
    pub fn lookup_ctor(&self, ty: TypeDefId, params: &[TypeDefId]) -> Option<CtorFn> {
        self.ctors
            .get(&ty)?
            .iter()
            .find(|o| o.params.as_slice() == params)
            .map(|o| o.call.clone())
    }

    /// Look up a static factory method overload by name and parameter types.
    pub fn lookup_static(
        &self,
        ty: TypeDefId,
        name: &str,
        params: &[TypeDefId],
    ) -> Option<CtorFn> {
        self.statics
            .get(&(ty, name.to_string()))?
            .iter()
            .find(|o| o.params.as_slice() == params)
            .map(|o| o.call.clone())
    }

    /// Look up a named public constant.
    pub fn lookup_constant(&self, ty: TypeDefId, name: &str) -> Option<Value> {
        self.constants.get(&(ty, name.to_string())).cloned()
    }
}
