//! Best-effort prefab construction for types that may be absent.
//!
//! Optional integrations register their types in some environments and not
//! others. The builder resolves its target by fully-qualified name; if the
//! type, or any member an attempt needs, does not exist, the builder goes
//! inert and the final [`add_to`](ConditionalBuilder::add_to) adds nothing,
//! with no error surfacing. Defects in the engine's own wiring (a
//! non-implementing concrete type, the wrong number of attempts) are the
//! exception: those are [`PrefabError::Bug`].

use std::rc::Rc;

use prefab_runtime::{Universe, Value};

use prefab_identity::TypeDefId;

use crate::engine::PrefabValues;
use crate::{PrefabError, TypeTag};

enum Attempt {
    Produced(Value),
    /// The environment is missing something; halt the chain silently.
    Absent,
    /// The engine's own setup is wrong; fail at commit.
    Defect(String),
}

pub struct ConditionalBuilder {
    universe: Rc<Universe>,
    target: Option<TypeDefId>,
    /// The type actually constructed: the target, or a substituted concrete
    /// implementation.
    subject: Option<TypeDefId>,
    halted: bool,
    defect: Option<String>,
    candidates: Vec<Value>,
}

impl ConditionalBuilder {
    /// Start a builder for the named type. An unresolved name makes every
    /// subsequent operation a no-op.
    pub fn of(universe: &Rc<Universe>, name: &str) -> Self {
        let target = universe.resolve(name);
        if target.is_none() {
            tracing::debug!(name, "optional type absent, builder inert");
        }
        Self {
            universe: universe.clone(),
            target,
            subject: target,
            halted: target.is_none(),
            defect: None,
            candidates: Vec::new(),
        }
    }

    /// Substitute a concrete implementing type when the target is an
    /// interface or abstract type.
    pub fn with_concrete(mut self, name: &str) -> Self {
        if self.halted || self.defect.is_some() {
            return self;
        }
        let Some(target) = self.target else {
            return self;
        };
        match self.universe.resolve(name) {
            None => self.halted = true,
            Some(concrete) => {
                if self.universe.assignable(concrete, target) {
                    self.subject = Some(concrete);
                } else {
                    self.defect = Some(format!(
                        "concrete type {name} is not a {}",
                        self.universe.name_of(target)
                    ));
                }
            }
        }
        self
    }

    /// Attempt construction through a constructor overload.
    pub fn instantiate(self, params: &[TypeDefId], args: &[Value]) -> Self {
        self.attempt(|b| {
            let Some(subject) = b.subject else {
                return Attempt::Absent;
            };
            match b.universe.constructors().lookup_ctor(subject, params) {
                Some(ctor) => Attempt::Produced(ctor(args)),
                None => Attempt::Absent,
            }
        })
    }

    /// Attempt construction through a constructor overload, drawing the
    /// first candidate's arguments from red prefabs and the second's from
    /// black. Parameter types without stored prefabs are a wiring defect.
    pub fn instantiate_with_prefabs(self, params: &[TypeDefId], values: &PrefabValues) -> Self {
        self.attempt(|b| {
            let Some(subject) = b.subject else {
                return Attempt::Absent;
            };
            let Some(ctor) = b.universe.constructors().lookup_ctor(subject, params) else {
                return Attempt::Absent;
            };
            let mut args = Vec::with_capacity(params.len());
            for param in params {
                let tag = TypeTag::new(*param);
                let drawn = if b.candidates.is_empty() {
                    values.stored_red(&tag)
                } else {
                    values.stored_black(&tag)
                };
                match drawn {
                    Ok(value) => args.push(value),
                    Err(_) => {
                        return Attempt::Defect(format!(
                            "no prefab values available for parameter type {}",
                            b.universe.name_of(*param)
                        ));
                    }
                }
            }
            Attempt::Produced(ctor(&args))
        })
    }

    /// Attempt construction through a named static factory method on the
    /// subject type.
    pub fn call_factory(self, method: &str, params: &[TypeDefId], args: &[Value]) -> Self {
        self.attempt(|b| {
            let Some(subject) = b.subject else {
                return Attempt::Absent;
            };
            match b.universe.constructors().lookup_static(subject, method, params) {
                Some(call) => Attempt::Produced(call(args)),
                None => Attempt::Absent,
            }
        })
    }

    /// Attempt construction through a static factory method that lives on a
    /// different (also possibly absent) type.
    pub fn call_factory_on(
        self,
        owner: &str,
        method: &str,
        params: &[TypeDefId],
        args: &[Value],
    ) -> Self {
        self.attempt(|b| {
            let Some(owner) = b.universe.resolve(owner) else {
                return Attempt::Absent;
            };
            match b.universe.constructors().lookup_static(owner, method, params) {
                Some(call) => Attempt::Produced(call(args)),
                None => Attempt::Absent,
            }
        })
    }

    /// Attempt to read a named public constant from the subject type.
    pub fn with_constant(self, name: &str) -> Self {
        self.attempt(|b| {
            let Some(subject) = b.subject else {
                return Attempt::Absent;
            };
            match b.universe.constructors().lookup_constant(subject, name) {
                Some(value) => Attempt::Produced(value),
                None => Attempt::Absent,
            }
        })
    }

    fn attempt(mut self, produce: impl FnOnce(&Self) -> Attempt) -> Self {
        if self.halted || self.defect.is_some() {
            return self;
        }
        if self.candidates.len() >= 2 {
            self.defect = Some("more than two construction attempts succeeded".to_string());
            return self;
        }
        match produce(&self) {
            Attempt::Produced(value) => self.candidates.push(value),
            Attempt::Absent => self.halted = true,
            Attempt::Defect(detail) => self.defect = Some(detail),
        }
        self
    }

    /// Commit the two accumulated candidates. An inert or halted builder
    /// adds nothing and succeeds; a live builder with anything other than
    /// exactly two candidates is a wiring defect.
    pub fn add_to(self, values: &mut PrefabValues) -> Result<(), PrefabError> {
        if let Some(detail) = self.defect {
            return Err(PrefabError::Bug { detail });
        }
        let Some(target) = self.target else {
            return Ok(());
        };
        if self.halted {
            return Ok(());
        }
        let [red, black]: [Value; 2] =
            self.candidates
                .try_into()
                .map_err(|candidates: Vec<Value>| PrefabError::Bug {
                    detail: format!(
                        "expected exactly two instances of {}, got {}",
                        self.universe.name_of(target),
                        candidates.len()
                    ),
                })?;
        values.put(TypeTag::new(target), red, black);
        Ok(())
    }
}
