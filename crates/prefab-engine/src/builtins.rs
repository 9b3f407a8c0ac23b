//! Standard prefab values and factories.
//!
//! The analogue of a standard-library seeding pass: tuples for every
//! primitive, two distinguishable tokens for the top type, factories for the
//! standard containers, and conditional builders for the optional `ext`
//! module. Callers run [`seed`] right after constructing an engine, or
//! hand-seed a minimal store instead; nothing here runs implicitly.

use prefab_runtime::Value;

use crate::{
    ConditionalBuilder, MapFactory, PrefabError, PrefabValues, SequenceFactory, SyncCellFactory,
    TypeTag,
};

/// Seed an engine with the standard values for its universe.
pub fn seed(values: &mut PrefabValues) -> Result<(), PrefabError> {
    seed_primitives(values);
    register_container_factories(values);
    seed_optional_integrations(values)?;
    Ok(())
}

fn seed_primitives(values: &mut PrefabValues) {
    let universe = values.universe_rc();
    let p = *universe.primitives();

    let mut put = |ty, red, black| values.put(TypeTag::new(ty), red, black);
    put(p.bool, Value::Bool(true), Value::Bool(false));
    put(p.i8, Value::I8(1), Value::I8(2));
    put(p.i16, Value::I16(1), Value::I16(2));
    put(p.i32, Value::I32(1), Value::I32(2));
    put(p.i64, Value::I64(1), Value::I64(2));
    put(p.f32, Value::F32(0.5), Value::F32(1.0));
    put(p.f64, Value::F64(0.5), Value::F64(1.0));
    put(p.string, Value::from("one"), Value::from("two"));

    // Two opaque instances of the top type, distinguishable by token id.
    put(universe.any(), Value::Token(0), Value::Token(1));
}

/// Register factories for whichever standard containers this universe has.
fn register_container_factories(values: &mut PrefabValues) {
    let universe = values.universe_rc();
    if let Some(list) = universe.resolve("std.List") {
        values.add_factory(list, SequenceFactory::new(list));
    }
    if let Some(set) = universe.resolve("std.Set") {
        values.add_factory(set, SequenceFactory::new(set));
    }
    if let Some(map) = universe.resolve("std.Map") {
        values.add_factory(map, MapFactory::new(map));
    }
    if let Some(cell) = universe.resolve("std.SyncCell") {
        values.add_factory(cell, SyncCellFactory::new(cell));
    }
}

/// Prefab values for the optional `ext` module. Every builder is inert in a
/// universe built without the module; nothing fails.
fn seed_optional_integrations(values: &mut PrefabValues) -> Result<(), PrefabError> {
    let universe = values.universe_rc();
    let i32_ty = universe.primitives().i32;

    ConditionalBuilder::of(&universe, "ext.Zone")
        .call_factory("of_offset", &[i32_ty], &[Value::I32(1)])
        .call_factory("of_offset", &[i32_ty], &[Value::I32(-10)])
        .add_to(values)?;

    ConditionalBuilder::of(&universe, "ext.Formatter")
        .with_constant("ISO_TIME")
        .with_constant("ISO_DATE")
        .add_to(values)?;

    ConditionalBuilder::of(&universe, "ext.Interval")
        .with_concrete("ext.IntervalImpl")
        .instantiate(&[i32_ty, i32_ty], &[Value::I32(2009), Value::I32(6)])
        .instantiate(&[i32_ty, i32_ty], &[Value::I32(2014), Value::I32(7)])
        .add_to(values)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefab_runtime::{FieldSpec, Universe};
    use std::rc::Rc;

    #[test]
    fn primitives_are_seeded() {
        let universe = Rc::new(Universe::new());
        let mut values = PrefabValues::new(universe.clone());
        seed(&mut values).unwrap();

        let p = universe.primitives();
        for ty in [p.bool, p.i8, p.i16, p.i32, p.i64, p.f32, p.f64, p.string] {
            let tag = TypeTag::new(ty);
            assert!(values.contains(&tag), "missing tuple for {}", universe.name_of(ty));
            let red = values.stored_red(&tag).unwrap();
            let black = values.stored_black(&tag).unwrap();
            assert_ne!(red, black, "red equals black for {}", universe.name_of(ty));
        }
    }

    #[test]
    fn top_type_gets_distinct_tokens() {
        let universe = Rc::new(Universe::new());
        let mut values = PrefabValues::new(universe.clone());
        seed(&mut values).unwrap();

        let tag = TypeTag::new(universe.any());
        assert_eq!(values.stored_red(&tag).unwrap(), Value::Token(0));
        assert_eq!(values.stored_black(&tag).unwrap(), Value::Token(1));
    }

    #[test]
    fn container_factories_register_when_present() {
        let mut u = Universe::new();
        let list = u.register_container("std.List", 1);
        let mut values = PrefabValues::new(Rc::new(u));
        seed(&mut values).unwrap();

        let string = values.universe().primitives().string;
        let tag = TypeTag::with_args(list, vec![TypeTag::new(string)]);
        assert!(values.red(&tag).is_ok());
    }

    #[test]
    fn optional_integrations_are_inert_without_the_ext_module() {
        let universe = Rc::new(Universe::new());
        let mut values = PrefabValues::new(universe);
        // Must not error even though no ext.* type exists.
        seed(&mut values).unwrap();
    }

    #[test]
    fn optional_integrations_seed_when_the_ext_module_exists() {
        let mut u = Universe::new();
        let i32_ty = u.primitives().i32;
        let zone = u.register_object("ext.Zone", vec![FieldSpec::instance("offset", i32_ty)]);
        let offset = u.fields_of(zone)[0].id;
        u.constructors_mut()
            .register_static(zone, "of_offset", vec![i32_ty], move |args| Value::Object {
                ty: zone,
                fields: vec![(offset, args[0].clone())],
            });
        let mut values = PrefabValues::new(Rc::new(u));
        seed(&mut values).unwrap();

        let tag = TypeTag::new(zone);
        assert!(values.contains(&tag));
        assert_ne!(
            values.stored_red(&tag).unwrap(),
            values.stored_black(&tag).unwrap()
        );
    }
}
