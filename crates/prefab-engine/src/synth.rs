//! Recursive synthesis of red/black tuples.
//!
//! The traversal keeps an explicit in-progress set of tags, cloned per
//! branch, so a cyclic type graph surfaces as a [`PrefabError::Recursion`]
//! with the full encounter chain instead of exhausting the call stack.

use prefab_runtime::{FieldDef, TypeKind, Value};

use prefab_identity::TypeDefId;

use crate::engine::PrefabValues;
use crate::{PrefabError, TypeTag};

/// Kinds that are never synthesized: primitives are seeded, and the top and
/// wildcard markers only ever appear as resolved argument positions.
fn needs_no_synthesis(kind: &TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Primitive | TypeKind::Any | TypeKind::Wildcard
    )
}

impl PrefabValues {
    /// Create prefab values for `tag` and, recursively, for the types it is
    /// built from, committing every result into the store.
    #[tracing::instrument(skip(self, tag), fields(tag = %tag.display(self.universe())))]
    pub fn synthesize(&mut self, tag: &TypeTag) -> Result<(), PrefabError> {
        self.synthesize_guarded(tag, &[])
    }

    fn synthesize_guarded(
        &mut self,
        tag: &TypeTag,
        in_progress: &[TypeTag],
    ) -> Result<(), PrefabError> {
        let universe = self.universe_rc();

        if self.contains(tag) || needs_no_synthesis(universe.kind_of(tag.raw())) {
            return Ok(());
        }
        if in_progress.contains(tag) {
            return Err(PrefabError::Recursion {
                chain: in_progress.iter().map(|t| t.display(&universe)).collect(),
            });
        }

        self.backup_to_stash(tag);
        let mut guard = in_progress.to_vec();
        guard.push(tag.clone());

        let raw = tag.raw();
        if let Some(factory) = self.store.factory(raw) {
            tracing::debug!("dispatching to registered factory");
            for arg in tag.args() {
                self.synthesize_guarded(arg, &guard)?;
            }
            let red = factory.create_red(tag, self)?;
            let black = factory.create_black(tag, self)?;
            self.put(tag.clone(), red, black);
            return Ok(());
        }

        match universe.kind_of(raw) {
            TypeKind::Enum { constants } => self.put_enum(tag, constants.len()),
            TypeKind::Array { elem } => self.put_array(tag, *elem, &guard),
            _ => self.put_object(tag, &guard),
        }
    }

    fn put_enum(&mut self, tag: &TypeTag, constants: usize) -> Result<(), PrefabError> {
        let ty = tag.raw();
        match constants {
            0 => Err(PrefabError::EnumHasNoElements {
                name: self.universe.name_of(ty).to_string(),
            }),
            // A one-constant enum has exactly one distinguishable value, so
            // red and black are necessarily the same constant.
            1 => {
                let only = Value::Enum { ty, variant: 0 };
                self.put(tag.clone(), only.clone(), only);
                Ok(())
            }
            _ => {
                self.put(
                    tag.clone(),
                    Value::Enum { ty, variant: 0 },
                    Value::Enum { ty, variant: 1 },
                );
                Ok(())
            }
        }
    }

    fn put_array(
        &mut self,
        tag: &TypeTag,
        elem: TypeDefId,
        guard: &[TypeTag],
    ) -> Result<(), PrefabError> {
        let elem_tag = TypeTag::new(elem);
        self.synthesize_guarded(&elem_tag, guard)?;
        let red = Value::Array {
            elem,
            items: vec![self.stored_red(&elem_tag)?],
        };
        let black = Value::Array {
            elem,
            items: vec![self.stored_black(&elem_tag)?],
        };
        self.put(tag.clone(), red, black);
        Ok(())
    }

    fn put_object(&mut self, tag: &TypeTag, guard: &[TypeTag]) -> Result<(), PrefabError> {
        let universe = self.universe_rc();
        let raw = tag.raw();
        let fields: Vec<FieldDef> = universe.fields_of(raw).to_vec();

        // Static-final fields are immutable constants and are skipped.
        for field in traversed(&fields) {
            self.synthesize_guarded(&TypeTag::raw_of(field), guard)?;
        }

        // Red instance first, then black; static non-final fields are written
        // through to their global cells, which the stash snapshot above makes
        // reversible.
        let mut red_fields = Vec::new();
        for field in traversed(&fields) {
            let value = self.stored_red(&TypeTag::raw_of(field))?;
            if field.is_static {
                universe.static_set(field.id, value);
            } else {
                red_fields.push((field.id, value));
            }
        }
        let red = universe.instantiate(raw, red_fields);

        let mut black_fields = Vec::new();
        for field in traversed(&fields) {
            let value = self.stored_black(&TypeTag::raw_of(field))?;
            if field.is_static {
                universe.static_set(field.id, value);
            } else {
                black_fields.push((field.id, value));
            }
        }
        let black = universe.instantiate(raw, black_fields);

        self.put(tag.clone(), red, black);
        Ok(())
    }
}

fn traversed(fields: &[FieldDef]) -> impl Iterator<Item = &FieldDef> {
    fields.iter().filter(|f| !(f.is_static && f.is_final))
}
