// eqv_synth/accessor/canonical - Reconstruction accessor
use crate::error::SynthesisError;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{
    CanonicalCtor, CompositeShape, CompositeValue, CtorError, Discipline, FieldShape, ObjRef,
    RawType, TypeGraph, TypeTag, Value,
};

/// Accessor for types whose fields are fixed at construction time.
///
/// Every operation that would assign a field instead re-invokes the type's
/// single canonical constructor with a full set of field values. The
/// constructor re-validates its input, so reconstruction surfaces both
/// validation rejections and constructors that silently normalize what they
/// were given.
pub struct CanonicalAccessor<'g> {
    shape: &'g CompositeShape,
    graph: &'g TypeGraph,
    ctor: CanonicalCtor,
}

impl<'g> CanonicalAccessor<'g> {
    pub(crate) fn new(shape: &'g CompositeShape, graph: &'g TypeGraph, ctor: CanonicalCtor) -> Self {
        Self { shape, graph, ctor }
    }

    /// Invokes a canonical constructor and wraps the stored field values
    /// into a fresh instance.
    fn construct(
        raw: &RawType,
        ctor: &CanonicalCtor,
        fields: &[FieldShape],
        params: Vec<Value>,
    ) -> Result<ObjRef, SynthesisError> {
        let stored = ctor(&params).map_err(|error| match error {
            CtorError::Rejected {
                field,
                value,
                reason,
            } => SynthesisError::ConstructionRejected {
                raw: raw.clone(),
                field,
                value,
                reason,
            },
            CtorError::Failed { reason } => SynthesisError::reflection(format!(
                "constructor of `{raw}` failed: {reason}"
            )),
        })?;
        if stored.len() != fields.len() {
            return Err(SynthesisError::reflection(format!(
                "constructor of `{raw}` returned {} values for {} fields",
                stored.len(),
                fields.len()
            )));
        }
        let named = fields
            .iter()
            .map(|field| field.name.clone())
            .zip(stored)
            .collect();
        Ok(CompositeValue::new(raw.clone(), named).into_ref())
    }

    fn build(&self, params: Vec<Value>) -> Result<ObjRef, SynthesisError> {
        Self::construct(&self.shape.raw, &self.ctor, &self.shape.fields, params)
    }

    /// Reconstructs from `params` and requires the stored values to match
    /// them; names every field the constructor changed otherwise.
    fn build_checked(
        raw: &RawType,
        ctor: &CanonicalCtor,
        fields: &[FieldShape],
        params: Vec<Value>,
    ) -> Result<ObjRef, SynthesisError> {
        let rebuilt = Self::construct(raw, ctor, fields, params.clone())?;
        let changed: Vec<String> = {
            let stored = rebuilt.borrow();
            fields
                .iter()
                .zip(&params)
                .filter(|&(field, supplied)| stored.field(&field.name) != Some(supplied))
                .map(|(field, _)| field.name.clone())
                .collect()
        };
        if !changed.is_empty() {
            return Err(SynthesisError::InvariantViolation {
                raw: raw.clone(),
                fields: changed,
            });
        }
        Ok(rebuilt)
    }

    fn current_params(&self, obj: &ObjRef) -> Result<Vec<Value>, SynthesisError> {
        self.shape
            .fields
            .iter()
            .map(|field| self.read_field(obj, &field.name))
            .collect()
    }

    pub fn red_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| source.give_red(&field.declared.resolve(enclosing), guard))
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }

    pub fn blue_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| source.give_blue(&field.declared.resolve(enclosing), guard))
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }

    /// Re-invokes the canonical constructor with the instance's current
    /// field values, read from storage directly so lazily derived state
    /// cannot mask what is actually stored. A constructor that silently
    /// normalizes its input fails here with the offending field names.
    pub fn copy(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        let params = self.current_params(obj)?;
        Self::build_checked(&self.shape.raw, &self.ctor, &self.shape.fields, params)
    }

    /// Always a terminal error: a canonically constructed type cannot be
    /// rebuilt as a subtype without knowing the subtype's construction
    /// rules.
    pub fn copy_into_subtype(&self, target: &RawType) -> Result<ObjRef, SynthesisError> {
        Err(SynthesisError::reflection(format!(
            "cannot reconstruct canonically constructed `{}` as subtype `{target}`",
            self.shape.raw
        )))
    }

    /// Reconstructs through the supertype's canonical constructor, using
    /// the supertype's field set, when the supertype is itself canonically
    /// constructible.
    pub fn copy_into_supertype(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        let supertype = self.shape.supertype.as_ref().ok_or_else(|| {
            SynthesisError::reflection(format!("`{}` has no supertype", self.shape.raw))
        })?;
        let target = self.graph.composite(supertype).ok_or_else(|| {
            SynthesisError::reflection(format!("no composite shape registered for `{supertype}`"))
        })?;
        let Discipline::Canonical(target_ctor) = &target.discipline else {
            return Err(SynthesisError::reflection(format!(
                "supertype `{supertype}` of `{}` is not canonically constructible",
                self.shape.raw
            )));
        };
        let params = target
            .fields
            .iter()
            .map(|field| self.read_field(obj, &field.name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build_checked(&target.raw, target_ctor, &target.fields, params)
    }

    /// A brand-new instance built from substitute values unequal to the
    /// current ones, through the canonical constructor. A validation
    /// rejection comes back as a recoverable construction-rejected error.
    pub fn scramble(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| {
                let tag = field.declared.resolve(enclosing);
                let current = self.read_field(obj, &field.name)?;
                source.give_other(&tag, &current, guard)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }

    pub fn shallow_scramble(&self) -> Result<ObjRef, SynthesisError> {
        Err(SynthesisError::reflection(format!(
            "cannot shallow-scramble canonically constructed `{}`",
            self.shape.raw
        )))
    }

    pub fn read_field(&self, obj: &ObjRef, name: &str) -> Result<Value, SynthesisError> {
        obj.borrow().field(name).cloned().ok_or_else(|| {
            SynthesisError::reflection(format!("`{}` has no field `{name}`", self.shape.raw))
        })
    }

    /// A completed-but-defaulted instance: non-null-exempt fields keep red
    /// values, the rest are constructed from their defaults. The
    /// constructor may legitimately reject the defaults, which surfaces as
    /// a construction-rejected error.
    pub fn clear(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| {
                if field.non_null {
                    source.give_red(&field.declared.resolve(enclosing), guard)
                } else {
                    Ok(Value::default_for_declared(&field.declared))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }

    pub fn with_field_set_to(
        &self,
        obj: &ObjRef,
        name: &str,
        value: Value,
    ) -> Result<ObjRef, SynthesisError> {
        if !self.shape.fields.iter().any(|field| field.name == name) {
            return Err(SynthesisError::reflection(format!(
                "`{}` has no field `{name}`",
                self.shape.raw
            )));
        }
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| {
                if field.name == name {
                    Ok(value.clone())
                } else {
                    self.read_field(obj, &field.name)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }

    pub fn with_changed_field(
        &self,
        obj: &ObjRef,
        name: &str,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        if !self.shape.fields.iter().any(|field| field.name == name) {
            return Err(SynthesisError::reflection(format!(
                "`{}` has no field `{name}`",
                self.shape.raw
            )));
        }
        let params = self
            .shape
            .fields
            .iter()
            .map(|field| {
                let current = self.read_field(obj, &field.name)?;
                if field.name == name {
                    let tag = field.declared.resolve(enclosing);
                    source.give_other(&tag, &current, guard)
                } else {
                    Ok(current)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.build(params)
    }
}
