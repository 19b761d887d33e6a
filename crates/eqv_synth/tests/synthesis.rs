use eqv_model::{
    names, CanonicalCtor, CompositeShape, DeclaredType, Discipline, FieldShape, RawType, TypeGraph,
    TypeShape, TypeTag, Value,
};
use eqv_synth::{builtins, FactoryRegistry, SynthesisError, TypeStack, ValueSource};
use std::rc::Rc;

fn passthrough() -> CanonicalCtor {
    Rc::new(|params: &[Value]| Ok(params.to_vec()))
}

fn field(name: &str, raw: &str) -> FieldShape {
    FieldShape::new(name, DeclaredType::simple(raw))
}

fn request(graph: &TypeGraph, tag: &TypeTag) -> Result<eqv_model::Triple, SynthesisError> {
    ValueSource::new(graph, builtins()).request_triple(tag, &TypeStack::new())
}

#[test]
fn enum_with_two_or_more_constants_uses_the_first_two() {
    let mut graph = TypeGraph::new();
    graph.register(
        "direction",
        TypeShape::Enum {
            constants: vec!["NORTH".into(), "SOUTH".into(), "EAST".into()],
        },
    );

    let triple = request(&graph, &TypeTag::simple("direction")).unwrap();
    assert_eq!(triple.red, Value::enum_constant("direction", "NORTH"));
    assert_eq!(triple.blue, Value::enum_constant("direction", "SOUTH"));
    assert_eq!(triple.red_copy, triple.red);
}

#[test]
fn enum_with_one_constant_fills_all_three_slots_with_it() {
    let mut graph = TypeGraph::new();
    graph.register(
        "unit",
        TypeShape::Enum {
            constants: vec!["INSTANCE".into()],
        },
    );

    let triple = request(&graph, &TypeTag::simple("unit")).unwrap();
    assert_eq!(triple.red, triple.blue);
    assert_eq!(triple.red, triple.red_copy);
    assert_eq!(triple.red, Value::enum_constant("unit", "INSTANCE"));
}

#[test]
fn enum_without_constants_yields_null_equivalents() {
    let mut graph = TypeGraph::new();
    graph.register(
        "empty",
        TypeShape::Enum {
            constants: Vec::new(),
        },
    );

    let triple = request(&graph, &TypeTag::simple("empty")).unwrap();
    assert_eq!(triple.red, Value::Null);
    assert_eq!(triple.blue, Value::Null);
    assert_eq!(triple.red_copy, Value::Null);
}

#[test]
fn array_types_yield_length_one_arrays_over_the_component_triple() {
    let mut graph = TypeGraph::new();
    graph.register(
        "int_array",
        TypeShape::Array {
            component: TypeTag::simple(names::INT),
        },
    );

    let triple = request(&graph, &TypeTag::simple("int_array")).unwrap();
    assert_eq!(triple.red, Value::Array(vec![Value::Int(42)]));
    assert_eq!(triple.blue, Value::Array(vec![Value::Int(1337)]));
    assert_eq!(triple.red_copy, triple.red);
}

#[test]
fn direct_composites_come_back_fully_populated_and_unequal() {
    let mut graph = TypeGraph::new();
    graph.register_composite(CompositeShape::new(
        "point",
        vec![field("x", names::INT), field("label", names::STRING)],
        Discipline::DirectField,
    ));

    let triple = request(&graph, &TypeTag::simple("point")).unwrap();
    assert_ne!(triple.red, triple.blue);
    assert_eq!(triple.red, triple.red_copy);
    assert!(!triple.red.same_instance(&triple.red_copy));

    let Value::Object(red) = &triple.red else {
        panic!("expected an object");
    };
    let red = red.borrow();
    assert_eq!(red.field("x"), Some(&Value::Int(42)));
    assert_eq!(red.field("label"), Some(&Value::str("one")));
}

#[test]
fn type_parameters_are_resolved_positionally_from_the_request_tag() {
    let mut graph = TypeGraph::new();
    graph.register_composite(
        CompositeShape::new(
            "box",
            vec![FieldShape::new("item", DeclaredType::variable(0))],
            Discipline::DirectField,
        )
        .with_params(vec!["T".into()]),
    );

    let tag = TypeTag::new("box", vec![TypeTag::simple(names::STRING)]);
    let triple = request(&graph, &tag).unwrap();

    let Value::Object(red) = &triple.red else {
        panic!("expected an object");
    };
    assert_eq!(red.borrow().field("item"), Some(&Value::str("one")));
}

#[test]
fn raw_usage_of_a_generic_type_degrades_its_parameter_to_the_opaque_type() {
    let mut graph = TypeGraph::new();
    graph.register_composite(
        CompositeShape::new(
            "box",
            vec![FieldShape::new("item", DeclaredType::variable(0))],
            Discipline::DirectField,
        )
        .with_params(vec!["T".into()]),
    );

    let triple = request(&graph, &TypeTag::simple("box")).unwrap();
    let Value::Object(red) = &triple.red else {
        panic!("expected an object");
    };
    assert_eq!(
        red.borrow().field("item"),
        Some(&Value::token(names::ANY, "red"))
    );
}

#[test]
fn two_type_cycles_fail_naming_both_types_on_the_path() {
    let mut graph = TypeGraph::new();
    graph.register_composite(CompositeShape::new(
        "node",
        vec![FieldShape::new("next", DeclaredType::simple("edge"))],
        Discipline::DirectField,
    ));
    graph.register_composite(CompositeShape::new(
        "edge",
        vec![FieldShape::new("back", DeclaredType::simple("node"))],
        Discipline::DirectField,
    ));

    let error = request(&graph, &TypeTag::simple("node")).unwrap_err();
    let path = error.cycle_path().expect("expected a recursion error");
    assert!(path.contains(&TypeTag::simple("node")));
    assert!(path.contains(&TypeTag::simple("edge")));
}

#[test]
fn self_referential_types_fail_with_themselves_on_the_path() {
    let mut graph = TypeGraph::new();
    graph.register_composite(CompositeShape::new(
        "node",
        vec![FieldShape::new("next", DeclaredType::simple("node"))],
        Discipline::DirectField,
    ));

    let error = request(&graph, &TypeTag::simple("node")).unwrap_err();
    assert_eq!(error.cycle_path(), Some(&[TypeTag::simple("node")][..]));
}

#[test]
fn an_explicit_factory_for_a_cycle_member_breaks_the_cycle() {
    let mut graph = TypeGraph::new();
    graph.register_composite(CompositeShape::new(
        "node",
        vec![FieldShape::new("next", DeclaredType::simple("edge"))],
        Discipline::DirectField,
    ));
    graph.register_composite(CompositeShape::new(
        "edge",
        vec![FieldShape::new("back", DeclaredType::simple("node"))],
        Discipline::DirectField,
    ));

    let mut overrides = FactoryRegistry::new();
    overrides.register_simple(
        "edge",
        Value::token("edge", "red"),
        Value::token("edge", "blue"),
    );
    let registry = builtins().merge_from(&overrides);

    let source = ValueSource::new(&graph, registry);
    let triple = source
        .request_triple(&TypeTag::simple("node"), &TypeStack::new())
        .unwrap();
    assert_ne!(triple.red, triple.blue);
}

#[test]
fn canonical_two_field_types_reconstruct_an_equivalent_red_copy() {
    let mut graph = TypeGraph::new();
    graph.register_composite(CompositeShape::new(
        "pair",
        vec![field("i", names::INT), field("s", names::STRING)],
        Discipline::Canonical(passthrough()),
    ));

    let triple = request(&graph, &TypeTag::simple("pair")).unwrap();

    let Value::Object(red) = &triple.red else {
        panic!("expected an object");
    };
    let Value::Object(blue) = &triple.blue else {
        panic!("expected an object");
    };
    assert_eq!(red.borrow().field("i"), Some(&Value::Int(42)));
    assert_eq!(blue.borrow().field("i"), Some(&Value::Int(1337)));
    assert_ne!(red.borrow().field("s"), blue.borrow().field("s"));

    assert_eq!(triple.red, triple.red_copy);
    assert!(!triple.red.same_instance(&triple.red_copy));
}

#[test]
fn containers_of_degenerate_element_types_collapse_their_blue_slot() {
    let mut graph = TypeGraph::new();
    graph.register(
        "singleton",
        TypeShape::Enum {
            constants: vec!["ONLY".into()],
        },
    );

    let tag = TypeTag::new(names::LIST, vec![TypeTag::simple("singleton")]);
    let triple = request(&graph, &tag).unwrap();

    assert_eq!(
        triple.blue,
        Value::Seq {
            ty: RawType::new(names::LIST),
            items: Vec::new(),
        }
    );
    assert_ne!(triple.red, triple.blue);
    assert_eq!(triple.red, triple.red_copy);
}

#[test]
fn types_without_shape_or_factory_are_an_introspection_failure() {
    let graph = TypeGraph::new();
    let error = request(&graph, &TypeTag::simple("mystery")).unwrap_err();
    assert!(matches!(error, SynthesisError::ReflectionFailure { .. }));
}

#[test]
fn caller_factories_override_builtins_through_merge() {
    let graph = TypeGraph::new();
    let mut overrides = FactoryRegistry::new();
    overrides.register_simple(names::STRING, Value::str("alpha"), Value::str("omega"));

    let source = ValueSource::new(&graph, builtins().merge_from(&overrides));
    let triple = source
        .request_triple(&TypeTag::simple(names::STRING), &TypeStack::new())
        .unwrap();
    assert_eq!(triple.red, Value::str("alpha"));
    assert_eq!(triple.blue, Value::str("omega"));
}
