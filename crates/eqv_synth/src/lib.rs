// eqv_synth - Sample-value synthesis engine
//! Synthesizes pairs of deliberately non-equal sample values for arbitrary,
//! possibly generic, possibly self-referential types described in an
//! [`eqv_model::TypeGraph`].
//!
//! The unit of exchange is the red/blue/redCopy [`eqv_model::Triple`]:
//! `red` and `blue` differ under the type's intended equivalence, while
//! `red_copy` is an independently constructed value equivalent to `red`.
//! Callers request triples from a [`ValueSource`], which consults its
//! [`FactoryRegistry`] first and falls back to structural synthesis for
//! everything else, guarding against self-referential type graphs with a
//! copy-on-extend [`TypeStack`].

pub mod accessor;
pub mod error;
pub mod fallback;
pub mod generic;
pub mod prefab;
pub mod registry;
pub mod source;
pub mod stack;

#[cfg(test)]
mod tests;

pub use accessor::{CanonicalAccessor, DirectFieldAccessor, ObjectAccessor};
pub use error::SynthesisError;
pub use fallback::FallbackSynthesizer;
pub use generic::GenericValueSupplier;
pub use prefab::builtins;
pub use registry::{FactoryRegistry, FnFactory, SimpleFactory, ValueFactory};
pub use source::ValueSource;
pub use stack::TypeStack;
