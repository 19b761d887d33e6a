// eqv_synth/fallback - Structural synthesis for unregistered types
use crate::accessor::ObjectAccessor;
use crate::error::SynthesisError;
use crate::registry::ValueFactory;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{CompositeShape, Triple, TypeShape, TypeTag, Value};
use tracing::debug;

/// Produces triples for any type without an explicit factory by case
/// analysis on its registered shape: enumerated constants, arrays, or
/// general composites populated field by field through the accessor layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSynthesizer;

impl FallbackSynthesizer {
    pub fn new() -> Self {
        Self
    }

    fn enum_triple(tag: &TypeTag, constants: &[String]) -> Triple {
        match constants {
            // No constants means no inhabitants; null stands in for all
            // three slots.
            [] => Triple::uniform(Value::Null),
            // A single constant leaves no way to produce an unequal
            // alternative.
            [only] => Triple::uniform(Value::enum_constant(tag.raw().clone(), only.clone())),
            [first, second, ..] => Triple::new(
                Value::enum_constant(tag.raw().clone(), first.clone()),
                Value::enum_constant(tag.raw().clone(), second.clone()),
                Value::enum_constant(tag.raw().clone(), first.clone()),
            ),
        }
    }

    fn array_triple(
        component: &TypeTag,
        source: &ValueSource<'_>,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        let element = source.request_triple(component, guard)?;
        Ok(Triple::new(
            Value::Array(vec![element.red.clone()]),
            Value::Array(vec![element.blue]),
            Value::Array(vec![element.red]),
        ))
    }

    fn composite_triple(
        shape: &CompositeShape,
        tag: &TypeTag,
        source: &ValueSource<'_>,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        let accessor = ObjectAccessor::of(shape, source.graph());
        let red = accessor.red_object(source, tag, guard)?;
        let blue = accessor.blue_object(source, tag, guard)?;
        let red_copy = accessor.red_object(source, tag, guard)?;
        Ok(Triple::new(
            Value::Object(red),
            Value::Object(blue),
            Value::Object(red_copy),
        ))
    }
}

impl ValueFactory for FallbackSynthesizer {
    fn create(
        &self,
        tag: &TypeTag,
        source: &ValueSource<'_>,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        let shape = source.graph().shape_of(tag.raw()).ok_or_else(|| {
            SynthesisError::reflection(format!(
                "no factory and no shape registered for type `{}`",
                tag.raw()
            ))
        })?;

        match shape {
            TypeShape::Enum { constants } => Ok(Self::enum_triple(tag, constants)),
            TypeShape::Array { component } => {
                if guard.contains(tag) {
                    return Err(SynthesisError::RecursiveStructure {
                        path: guard.tags().to_vec(),
                    });
                }
                let extended = guard.push(tag.clone());
                Self::array_triple(component, source, &extended)
            }
            TypeShape::Composite(composite) => {
                if guard.contains(tag) {
                    return Err(SynthesisError::RecursiveStructure {
                        path: guard.tags().to_vec(),
                    });
                }
                let extended = guard.push(tag.clone());
                debug!(tag = %tag, depth = extended.len(), "synthesizing composite");
                Self::composite_triple(composite, tag, source, &extended)
            }
        }
    }
}
