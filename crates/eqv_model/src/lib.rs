// eqv_model - Data model for the eqv sample-value synthesis engine
//! Pure data shared by the synthesis engine: raw-type names, type tags,
//! declared (unresolved) field types, the dynamic value representation, and
//! the introspectable type graph that stands in for runtime reflection.
//!
//! Nothing in this crate produces values; it only describes types and holds
//! the values the engine in `eqv_synth` produces.

pub mod mirror;
pub mod tag;
pub mod value;

pub use mirror::{
    CanonicalCtor, CompositeShape, CtorError, Discipline, FieldShape, TypeGraph, TypeShape,
};
pub use tag::{names, DeclaredType, RawType, TypeTag};
pub use value::{CompositeValue, ObjRef, Triple, Value};
