use crate::prefab::builtins;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{names, TypeGraph, TypeTag, Value};

const SCALARS: &[&str] = &[
    names::BOOL,
    names::BYTE,
    names::SHORT,
    names::INT,
    names::LONG,
    names::FLOAT,
    names::DOUBLE,
    names::CHAR,
    names::STRING,
    names::ANY,
];

#[test]
fn every_builtin_scalar_yields_an_unequal_pair_and_an_equivalent_copy() {
    let graph = TypeGraph::new();
    let source = ValueSource::new(&graph, builtins());
    let guard = TypeStack::new();

    for raw in SCALARS {
        let triple = source
            .request_triple(&TypeTag::simple(*raw), &guard)
            .unwrap();
        assert_ne!(triple.red, triple.blue, "scalar `{raw}`");
        assert_eq!(triple.red, triple.red_copy, "scalar `{raw}`");
        assert!(!triple.red.same_instance(&triple.red_copy));
    }
}

#[test]
fn untyped_requests_degrade_to_the_opaque_type() {
    let graph = TypeGraph::new();
    let source = ValueSource::new(&graph, builtins());

    let triple = source
        .request_triple(&TypeTag::unknown(), &TypeStack::new())
        .unwrap();
    assert_eq!(triple.red, Value::token(names::ANY, "red"));
    assert_eq!(triple.blue, Value::token(names::ANY, "blue"));
}

#[test]
fn container_builtins_resolve_their_element_types() {
    let graph = TypeGraph::new();
    let source = ValueSource::new(&graph, builtins());
    let guard = TypeStack::new();

    let tag = TypeTag::new(names::LIST, vec![TypeTag::simple(names::BOOL)]);
    let triple = source.request_triple(&tag, &guard).unwrap();
    match &triple.red {
        Value::Seq { items, .. } => assert_eq!(items, &vec![Value::Bool(true)]),
        other => panic!("expected a sequence, got {other:?}"),
    }
    assert_ne!(triple.red, triple.blue);
}
