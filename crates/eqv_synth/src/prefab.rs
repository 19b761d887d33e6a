// eqv_synth/prefab - Built-in factory seed
use crate::error::SynthesisError;
use crate::generic::GenericValueSupplier;
use crate::registry::{FactoryRegistry, FnFactory};
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{names, RawType, Triple, TypeTag, Value};
use std::rc::Rc;

/// The built-in registry seed: scalar types, the opaque `any` type, and the
/// container shapes. Callers merge their own factories over this; merging
/// never mutates the seed a caller already holds.
pub fn builtins() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    scalars(&mut registry);
    containers(&mut registry);
    registry
}

fn scalars(registry: &mut FactoryRegistry) {
    registry.register_simple(names::BOOL, Value::Bool(true), Value::Bool(false));
    registry.register_simple(names::BYTE, Value::Int(1), Value::Int(2));
    registry.register_simple(names::SHORT, Value::Int(3), Value::Int(4));
    registry.register_simple(names::INT, Value::Int(42), Value::Int(1337));
    registry.register_simple(names::LONG, Value::Int(1_000_000), Value::Int(2_000_000));
    registry.register_simple(names::FLOAT, Value::Float(0.5), Value::Float(-0.5));
    registry.register_simple(names::DOUBLE, Value::Float(0.25), Value::Float(0.75));
    registry.register_simple(names::CHAR, Value::Char('x'), Value::Char('y'));
    registry.register_simple(names::STRING, Value::str("one"), Value::str("two"));
    registry.register_simple(
        names::ANY,
        Value::token(names::ANY, "red"),
        Value::token(names::ANY, "blue"),
    );
}

fn containers(registry: &mut FactoryRegistry) {
    registry.register(
        names::OPTION,
        Rc::new(FnFactory::new(
            |tag: &TypeTag,
             source: &ValueSource<'_>,
             guard: &TypeStack|
             -> Result<Triple, SynthesisError> {
                GenericValueSupplier::new(tag, source, guard).singular(|item| Value::Holder {
                    ty: RawType::new(names::OPTION),
                    item: item.map(Box::new),
                })
            },
        )),
    );

    for container in [names::LIST, names::SET] {
        registry.register(
            container,
            Rc::new(FnFactory::new(
                move |tag: &TypeTag,
                      source: &ValueSource<'_>,
                      guard: &TypeStack|
                      -> Result<Triple, SynthesisError> {
                    GenericValueSupplier::new(tag, source, guard).singular(move |item| Value::Seq {
                        ty: RawType::new(container),
                        items: item.into_iter().collect(),
                    })
                },
            )),
        );
    }

    registry.register(
        names::MAP,
        Rc::new(FnFactory::new(
            |tag: &TypeTag,
             source: &ValueSource<'_>,
             guard: &TypeStack|
             -> Result<Triple, SynthesisError> {
                GenericValueSupplier::new(tag, source, guard).keyed(|entry| Value::Map {
                    ty: RawType::new(names::MAP),
                    entries: entry.into_iter().collect(),
                })
            },
        )),
    );
}
