// eqv_synth/source - The synthesis entry point
use crate::error::SynthesisError;
use crate::fallback::FallbackSynthesizer;
use crate::registry::{FactoryRegistry, ValueFactory};
use crate::stack::TypeStack;
use eqv_model::{names, Triple, TypeGraph, TypeTag, Value};
use tracing::trace;

/// Hands out value triples for type tags: explicit factories first, the
/// structural fallback for everything else.
///
/// A source is owned by a single verification run. It borrows the run's
/// type graph and takes the run's merged factory registry by value; there
/// is no shared global state behind it.
pub struct ValueSource<'g> {
    graph: &'g TypeGraph,
    registry: FactoryRegistry,
    fallback: FallbackSynthesizer,
}

impl<'g> ValueSource<'g> {
    pub fn new(graph: &'g TypeGraph, registry: FactoryRegistry) -> Self {
        Self {
            graph,
            registry,
            fallback: FallbackSynthesizer::new(),
        }
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    pub fn registry(&self) -> &FactoryRegistry {
        &self.registry
    }

    /// Produces the value triple for `tag`.
    ///
    /// The unknown tag degrades to the opaque `any` type so wildcard-level
    /// requests still succeed. Values are synthesized fresh on every call;
    /// nothing is cached across requests.
    pub fn request_triple(
        &self,
        tag: &TypeTag,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        let degraded;
        let tag = if tag.is_unknown() {
            degraded = TypeTag::simple(names::ANY);
            &degraded
        } else {
            tag
        };

        if let Some(factory) = self.registry.lookup(tag.raw()) {
            trace!(tag = %tag, "explicit factory");
            return factory.create(tag, self, guard);
        }
        trace!(tag = %tag, "structural fallback");
        self.fallback.create(tag, self, guard)
    }

    pub fn give_red(&self, tag: &TypeTag, guard: &TypeStack) -> Result<Value, SynthesisError> {
        self.request_triple(tag, guard).map(|triple| triple.red)
    }

    pub fn give_blue(&self, tag: &TypeTag, guard: &TypeStack) -> Result<Value, SynthesisError> {
        self.request_triple(tag, guard).map(|triple| triple.blue)
    }

    pub fn give_red_copy(&self, tag: &TypeTag, guard: &TypeStack) -> Result<Value, SynthesisError> {
        self.request_triple(tag, guard)
            .map(|triple| triple.red_copy)
    }

    /// A value of `tag`'s type that is not equal to `value`: blue when
    /// `value` is the red sample, red otherwise.
    pub fn give_other(
        &self,
        tag: &TypeTag,
        value: &Value,
        guard: &TypeStack,
    ) -> Result<Value, SynthesisError> {
        let triple = self.request_triple(tag, guard)?;
        if &triple.red == value {
            Ok(triple.blue)
        } else {
            Ok(triple.red)
        }
    }
}
