use eqv_model::{names, DeclaredType, RawType, TypeTag};
use serde_json::json;

#[test]
fn type_tags_round_trip_through_serde() {
    let tag = TypeTag::new(
        names::MAP,
        vec![
            TypeTag::simple(names::STRING),
            TypeTag::new(names::LIST, vec![TypeTag::simple(names::INT)]),
        ],
    );

    let encoded = serde_json::to_value(&tag).unwrap();
    let decoded: TypeTag = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, tag);
}

#[test]
fn declared_types_round_trip_through_serde() {
    let declared = DeclaredType::of(
        names::MAP,
        vec![DeclaredType::variable(0), DeclaredType::Wildcard],
    );

    let encoded = serde_json::to_value(&declared).unwrap();
    assert_eq!(
        encoded,
        json!({
            "Concrete": {
                "raw": "map",
                "args": [{ "Variable": 0 }, "Wildcard"],
            }
        })
    );
    let decoded: DeclaredType = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, declared);
}

#[test]
fn the_unknown_tag_is_distinguished() {
    assert!(TypeTag::unknown().is_unknown());
    assert!(!TypeTag::simple(names::INT).is_unknown());
    assert_eq!(TypeTag::unknown(), TypeTag::unknown());
    assert_eq!(RawType::unknown().as_str(), "?");
}

#[test]
fn resolution_threads_arguments_through_nested_declarations() {
    let enclosing = TypeTag::new(
        "table",
        vec![TypeTag::simple(names::STRING), TypeTag::simple(names::INT)],
    );
    let declared = DeclaredType::of(
        names::MAP,
        vec![DeclaredType::variable(0), DeclaredType::variable(1)],
    );

    assert_eq!(
        declared.resolve(&enclosing),
        TypeTag::new(
            names::MAP,
            vec![TypeTag::simple(names::STRING), TypeTag::simple(names::INT)],
        )
    );
}
