//! End-to-end tests for the synthesis engine, driving it the way a
//! contract-verification consumer would.

use std::rc::Rc;

use prefab::{builtins, FieldSpec, PrefabError, PrefabValues, TypeTag, Universe, Value};

/// A universe with the standard containers and a few user types.
fn demo_universe() -> Universe {
    let mut u = Universe::new();
    u.register_container("std.List", 1);
    u.register_container("std.Set", 1);
    u.register_container("std.Map", 2);
    u.register_container("std.SyncCell", 1);
    u
}

fn engine(u: Universe) -> PrefabValues {
    let mut values = PrefabValues::new(Rc::new(u));
    builtins::seed(&mut values).unwrap();
    values
}

#[test]
fn composite_type_synthesizes_distinguishable_instances() {
    let mut u = demo_universe();
    let i64_ty = u.primitives().i64;
    let string = u.primitives().string;
    let color = u.register_enum("demo.Color", &["RED", "GREEN", "BLUE"]);
    let tags_arr = u.register_array_of(string);
    let list = u.resolve("std.List").unwrap();
    let person = u.register_object(
        "demo.Person",
        vec![
            FieldSpec::instance("id", i64_ty),
            FieldSpec::instance("name", string),
            FieldSpec::instance("favorite", color),
            FieldSpec::instance("tags", tags_arr),
            FieldSpec::instance("friends", list),
        ],
    );
    let mut values = engine(u);

    let tag = TypeTag::new(person);
    let red = values.red(&tag).unwrap();
    let black = values.black(&tag).unwrap();

    assert_ne!(red, black);
    // Field tuples were committed along the way.
    assert!(values.contains(&TypeTag::new(color)));
    assert!(values.contains(&TypeTag::new(tags_arr)));
    assert!(values.contains(&TypeTag::new(list)));
    // And the comparison helper flips correctly on the composite.
    assert_eq!(values.other(&tag, Some(&red)).unwrap(), black);
    assert_eq!(values.other(&tag, Some(&black)).unwrap(), red);
    assert_eq!(values.other(&tag, None).unwrap(), red);
}

#[test]
fn generic_list_of_strings_uses_seeded_element_values() {
    let mut u = demo_universe();
    let list = u.resolve("std.List").unwrap();
    let string = u.primitives().string;
    let mut values = engine(u);

    let tag = TypeTag::with_args(list, vec![TypeTag::new(string)]);
    assert_eq!(
        values.red(&tag).unwrap(),
        Value::Seq {
            ty: list,
            items: vec![Value::from("one")],
        }
    );
    assert_eq!(
        values.black(&tag).unwrap(),
        Value::Seq {
            ty: list,
            items: vec![Value::from("two")],
        }
    );
}

#[test]
fn cycle_fails_then_succeeds_after_preseeding() {
    let mut u = demo_universe();
    let node = u.declare_object("demo.Node");
    u.add_fields(node, vec![FieldSpec::instance("next", node)]);
    let next = u.fields_of(node)[0].id;
    let tree = u.register_object("demo.Tree", vec![FieldSpec::instance("root", node)]);
    let mut values = engine(u);

    // Reaching the cycle through the wrapper fails with the node in the
    // chain.
    let err = values.red(&TypeTag::new(tree)).unwrap_err();
    assert_eq!(
        err,
        PrefabError::Recursion {
            chain: vec!["demo.Tree".to_string(), "demo.Node".to_string()],
        }
    );

    // Pre-registering the cyclic member unblocks every type that reaches it.
    let n1 = Value::Object {
        ty: node,
        fields: vec![(next, Value::Unit)],
    };
    let n2 = Value::Object {
        ty: node,
        fields: vec![(next, Value::Token(7))],
    };
    values.put(TypeTag::new(node), n1, n2);
    assert!(values.red(&TypeTag::new(tree)).is_ok());
}

#[test]
fn globals_are_restored_after_a_successful_run() {
    let mut u = demo_universe();
    let i32_ty = u.primitives().i32;
    let ty = u.register_object(
        "demo.Registry",
        vec![
            FieldSpec::instance("n", i32_ty),
            FieldSpec::global("instances", i32_ty, Value::I32(17)),
        ],
    );
    let shared = u.fields_of(ty)[1].id;
    let mut values = engine(u);
    let universe = values.universe_rc();

    values.red(&TypeTag::new(ty)).unwrap();
    assert_ne!(universe.static_get(shared), Some(Value::I32(17)));

    values.restore_from_stash();
    assert_eq!(universe.static_get(shared), Some(Value::I32(17)));
}

#[test]
fn globals_are_restored_after_a_failed_run() {
    let mut u = demo_universe();
    let i32_ty = u.primitives().i32;
    // demo.Broken first pulls in a type with a global (which synthesis
    // mutates), then a cyclic type, so the run aborts partway through.
    let counter = u.register_object(
        "demo.Counter",
        vec![
            FieldSpec::instance("n", i32_ty),
            FieldSpec::global("count", i32_ty, Value::I32(5)),
        ],
    );
    let node = u.declare_object("demo.Node");
    u.add_fields(node, vec![FieldSpec::instance("next", node)]);
    let broken = u.register_object(
        "demo.Broken",
        vec![
            FieldSpec::instance("c", counter),
            FieldSpec::instance("node", node),
        ],
    );
    let mut values = engine(u);
    let universe = values.universe_rc();
    let count = universe.fields_of(counter)[1].id;

    let err = values.red(&TypeTag::new(broken)).unwrap_err();
    assert!(matches!(err, PrefabError::Recursion { .. }));
    // The counter's global was already overwritten before the abort.
    assert_eq!(universe.static_get(count), Some(Value::I32(2)));

    // The stash stayed valid through the abort.
    values.restore_from_stash();
    assert_eq!(universe.static_get(count), Some(Value::I32(5)));
}

#[test]
fn put_all_merges_engines() {
    let u = Rc::new(demo_universe());
    let mut first = PrefabValues::new(u.clone());
    builtins::seed(&mut first).unwrap();
    let string_tag = TypeTag::new(u.primitives().string);

    let mut second = PrefabValues::new(u.clone());
    assert!(!second.contains(&string_tag));
    second.put_all(&first);
    assert!(second.contains(&string_tag));
    assert_eq!(second.red(&string_tag).unwrap(), Value::from("one"));
}

#[test]
fn explicit_backup_supports_manual_probing() {
    let mut u = demo_universe();
    let i32_ty = u.primitives().i32;
    let ty = u.register_object(
        "demo.Config",
        vec![FieldSpec::global("mode", i32_ty, Value::I32(0))],
    );
    let mode = u.fields_of(ty)[0].id;
    let mut values = engine(u);
    let universe = values.universe_rc();

    // A consumer that pokes globals itself backs the type up first.
    values.backup_to_stash(&TypeTag::new(ty));
    universe.static_set(mode, Value::I32(3));
    values.restore_from_stash();
    assert_eq!(universe.static_get(mode), Some(Value::I32(0)));
}
