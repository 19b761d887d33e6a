// eqv_synth/accessor - Instance manipulation for composite types
//! The capability set over composite instances: read fields, copy,
//! scramble, reconstruct into a related type, and produce fully populated
//! red/blue objects.
//!
//! Two variants exist, selected once per type from its construction
//! discipline and never changed within a run: direct field manipulation for
//! ordinary types, and reconstruction through the canonical constructor for
//! types whose fields are fixed at construction time.

mod canonical;
mod direct;

pub use canonical::CanonicalAccessor;
pub use direct::DirectFieldAccessor;

use crate::error::SynthesisError;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{CompositeShape, Discipline, ObjRef, RawType, TypeGraph, TypeTag, Value};

/// Accessor over one composite type's instances.
///
/// Dispatch is a tagged variant rather than trait objects so that rules
/// like "a canonically constructed type can never be rebuilt as a subtype"
/// stay local to the variant that owns them.
pub enum ObjectAccessor<'g> {
    DirectField(DirectFieldAccessor<'g>),
    Canonical(CanonicalAccessor<'g>),
}

impl<'g> ObjectAccessor<'g> {
    /// Selects the variant from the type's construction discipline.
    pub fn of(shape: &'g CompositeShape, graph: &'g TypeGraph) -> Self {
        match &shape.discipline {
            Discipline::DirectField => {
                ObjectAccessor::DirectField(DirectFieldAccessor::new(shape, graph))
            }
            Discipline::Canonical(ctor) => {
                ObjectAccessor::Canonical(CanonicalAccessor::new(shape, graph, ctor.clone()))
            }
        }
    }

    /// A fully populated instance whose fields carry the red samples.
    pub fn red_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.red_object(source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.red_object(source, enclosing, guard),
        }
    }

    /// A fully populated instance whose fields carry the blue samples.
    pub fn blue_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.blue_object(source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.blue_object(source, enclosing, guard),
        }
    }

    /// An independent instance equivalent to `obj`. Nested reference-typed
    /// field values stay shared (shallow copy); on the canonical variant
    /// the copy goes through the constructor and fails with an
    /// invariant-violation error when the constructor tampers with values.
    pub fn copy(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.copy(obj),
            ObjectAccessor::Canonical(a) => a.copy(obj),
        }
    }

    /// Replaces every field with a registry-supplied value unequal to its
    /// current one. The direct variant mutates in place and returns the
    /// same instance; the canonical variant reconstructs.
    pub fn scramble(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.scramble(obj, source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.scramble(obj, source, enclosing, guard),
        }
    }

    /// Like [`ObjectAccessor::scramble`] but touching only the fields the
    /// type declares itself, not inherited ones. Meaningless for canonical
    /// types, which inherit no state.
    pub fn shallow_scramble(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.shallow_scramble(obj, source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.shallow_scramble(),
        }
    }

    /// Copies `obj` into an instance of the given subtype.
    pub fn copy_into_subtype(&self, obj: &ObjRef, target: &RawType) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.copy_into_subtype(obj, target),
            ObjectAccessor::Canonical(a) => a.copy_into_subtype(target),
        }
    }

    /// Copies `obj` into an instance of its supertype, using the
    /// supertype's field set.
    pub fn copy_into_supertype(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.copy_into_supertype(obj),
            ObjectAccessor::Canonical(a) => a.copy_into_supertype(obj),
        }
    }

    /// Current value of the named field, read from storage directly.
    pub fn read_field(&self, obj: &ObjRef, name: &str) -> Result<Value, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.read_field(obj, name),
            ObjectAccessor::Canonical(a) => a.read_field(obj, name),
        }
    }

    /// A completed-but-defaulted instance: fields exempt from null probing
    /// keep a registry-supplied red value, all others drop to their type's
    /// default.
    pub fn clear(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.clear(obj, source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.clear(source, enclosing, guard),
        }
    }

    /// Sets one field to the given value.
    pub fn with_field_set_to(
        &self,
        obj: &ObjRef,
        name: &str,
        value: Value,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.with_field_set_to(obj, name, value),
            ObjectAccessor::Canonical(a) => a.with_field_set_to(obj, name, value),
        }
    }

    /// Replaces one field with a registry-supplied value unequal to its
    /// current one.
    pub fn with_changed_field(
        &self,
        obj: &ObjRef,
        name: &str,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        match self {
            ObjectAccessor::DirectField(a) => a.with_changed_field(obj, name, source, enclosing, guard),
            ObjectAccessor::Canonical(a) => a.with_changed_field(obj, name, source, enclosing, guard),
        }
    }
}
