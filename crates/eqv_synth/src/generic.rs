// eqv_synth/generic - Element resolution for container-shaped types
use crate::error::SynthesisError;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{names, Triple, TypeTag, Value};

/// Resolves a container tag's element tags and produces element values for
/// them.
///
/// Three shapes are exposed: singular containers (one element slot), keyed
/// containers (key plus value), and a raw path for containers with no
/// element structure at all. Wildcard, raw, and absent type arguments all
/// degrade to the opaque `any` tag.
///
/// The collapse rule lives here: when the element type's red and blue
/// samples are themselves equal (a single-constant enumerated type, say),
/// the blue container collapses to the empty container. A one-element
/// container type has no other way to produce a provably unequal pair.
pub struct GenericValueSupplier<'a, 'g> {
    tag: &'a TypeTag,
    source: &'a ValueSource<'g>,
    guard: &'a TypeStack,
}

impl<'a, 'g> GenericValueSupplier<'a, 'g> {
    pub fn new(tag: &'a TypeTag, source: &'a ValueSource<'g>, guard: &'a TypeStack) -> Self {
        Self { tag, source, guard }
    }

    /// The type argument at `index`, degraded to the `any` tag when the
    /// container is used raw, with a wildcard, or with fewer arguments.
    pub fn element_tag(&self, index: usize) -> TypeTag {
        match self.tag.arg(index) {
            Some(arg) if !arg.is_unknown() => arg.clone(),
            _ => TypeTag::simple(names::ANY),
        }
    }

    /// Triple for a container with a single element slot. `build(None)`
    /// must produce the empty container.
    pub fn singular(
        &self,
        build: impl Fn(Option<Value>) -> Value,
    ) -> Result<Triple, SynthesisError> {
        let element = self.source.request_triple(&self.element_tag(0), self.guard)?;
        let triple = Triple::new(
            build(Some(element.red.clone())),
            build(Some(element.blue)),
            build(Some(element.red)),
        );
        Ok(triple.swap_blue_if_equal_to_red(|| build(None)))
    }

    /// Triple for a keyed container. The value slot always carries the
    /// element-blue value, in every slot of the triple, so identical key
    /// and value choices cannot cancel out and a degenerate key type still
    /// collapses the blue container to empty.
    pub fn keyed(
        &self,
        build: impl Fn(Option<(Value, Value)>) -> Value,
    ) -> Result<Triple, SynthesisError> {
        let keys = self.source.request_triple(&self.element_tag(0), self.guard)?;
        let values = self.source.request_triple(&self.element_tag(1), self.guard)?;
        let triple = Triple::new(
            build(Some((keys.red.clone(), values.blue.clone()))),
            build(Some((keys.blue, values.blue.clone()))),
            build(Some((keys.red, values.blue))),
        );
        Ok(triple.swap_blue_if_equal_to_red(|| build(None)))
    }

    /// Triple for a container type carrying no element structure: a
    /// one-token red against the empty blue, the only provably unequal pair
    /// constructible without element knowledge.
    pub fn raw(&self, build: impl Fn(Option<Value>) -> Value) -> Result<Triple, SynthesisError> {
        let token = self
            .source
            .request_triple(&TypeTag::simple(names::ANY), self.guard)?;
        Ok(Triple::new(
            build(Some(token.red.clone())),
            build(None),
            build(Some(token.red)),
        ))
    }
}
