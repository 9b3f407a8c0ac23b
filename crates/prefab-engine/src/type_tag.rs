//! Structural identifier for a type together with its generic arguments.

use prefab_runtime::{FieldDef, Universe};

use prefab_identity::TypeDefId;

/// A raw type plus its ordered generic arguments.
///
/// Tags are immutable after construction and compare structurally, so they
/// can key the prefab store: `std.List<string>` and `std.List<i64>` are
/// distinct keys, and two independently built `std.List<string>` tags are the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag {
    raw: TypeDefId,
    args: Vec<TypeTag>,
}

impl TypeTag {
    /// A tag with no generic arguments.
    pub fn new(raw: TypeDefId) -> Self {
        Self {
            raw,
            args: Vec::new(),
        }
    }

    /// A tag with explicit generic arguments.
    pub fn with_args(raw: TypeDefId, args: Vec<TypeTag>) -> Self {
        Self { raw, args }
    }

    pub fn raw(&self) -> TypeDefId {
        self.raw
    }

    pub fn args(&self) -> &[TypeTag] {
        &self.args
    }

    /// The raw-type-only tag for a declared field. Field declarations are not
    /// generically instantiated at traversal depth, so only the raw type is
    /// carried.
    pub fn raw_of(field: &FieldDef) -> Self {
        Self::new(field.ty)
    }

    /// The generic argument at position `n`, with a missing or wildcard
    /// argument standing in for the universal top type.
    pub fn arg_or_any(&self, n: usize, universe: &Universe) -> TypeTag {
        match self.args.get(n) {
            Some(arg) if arg.raw != universe.wildcard() => arg.clone(),
            _ => TypeTag::new(universe.any()),
        }
    }

    /// Render the tag for diagnostics, e.g. `std.Map<string, i64>`.
    pub fn display(&self, universe: &Universe) -> String {
        let name = universe.name_of(self.raw);
        if self.args.is_empty() {
            return name.to_string();
        }
        let args: Vec<String> = self.args.iter().map(|a| a.display(universe)).collect();
        format!("{}<{}>", name, args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(tag: &TypeTag) -> u64 {
        let mut h = DefaultHasher::new();
        tag.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_is_structural() {
        let mut u = Universe::new();
        let list = u.register_container("std.List", 1);
        let string = u.primitives().string;
        let i64_ty = u.primitives().i64;

        let a = TypeTag::with_args(list, vec![TypeTag::new(string)]);
        let b = TypeTag::with_args(list, vec![TypeTag::new(string)]);
        let c = TypeTag::with_args(list, vec![TypeTag::new(i64_ty)]);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
        assert_ne!(a, TypeTag::new(list));
    }

    #[test]
    fn arg_or_any_resolves_wildcard_and_missing() {
        let mut u = Universe::new();
        let list = u.register_container("std.List", 1);
        let string = u.primitives().string;

        let plain = TypeTag::new(list);
        assert_eq!(plain.arg_or_any(0, &u), TypeTag::new(u.any()));

        let wild = TypeTag::with_args(list, vec![TypeTag::new(u.wildcard())]);
        assert_eq!(wild.arg_or_any(0, &u), TypeTag::new(u.any()));

        let concrete = TypeTag::with_args(list, vec![TypeTag::new(string)]);
        assert_eq!(concrete.arg_or_any(0, &u), TypeTag::new(string));
    }

    #[test]
    fn display_nests_arguments() {
        let mut u = Universe::new();
        let map = u.register_container("std.Map", 2);
        let list = u.register_container("std.List", 1);
        let string = u.primitives().string;
        let i64_ty = u.primitives().i64;

        let tag = TypeTag::with_args(
            map,
            vec![
                TypeTag::new(string),
                TypeTag::with_args(list, vec![TypeTag::new(i64_ty)]),
            ],
        );
        assert_eq!(tag.display(&u), "std.Map<string, std.List<i64>>");
    }
}
