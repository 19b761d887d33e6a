// eqv_synth/accessor/direct - Field-assignment accessor
use crate::error::SynthesisError;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{
    CompositeShape, CompositeValue, FieldShape, ObjRef, RawType, TypeGraph, TypeTag, Value,
};

/// Accessor for types whose fields are assignable after construction.
///
/// Instances are created zero-initialized (construction arguments are
/// unknown) and populated by direct field writes. Field iteration covers
/// the whole supertype chain.
pub struct DirectFieldAccessor<'g> {
    shape: &'g CompositeShape,
    graph: &'g TypeGraph,
}

impl<'g> DirectFieldAccessor<'g> {
    pub(crate) fn new(shape: &'g CompositeShape, graph: &'g TypeGraph) -> Self {
        Self { shape, graph }
    }

    fn fields(&self) -> Vec<&'g FieldShape> {
        self.graph.fields_including_super(self.shape)
    }

    /// A zero-initialized instance of this accessor's type: scalar fields
    /// at their zero value, reference fields null.
    pub fn instantiate(&self) -> ObjRef {
        Self::zero_init(self.graph, self.shape)
    }

    fn zero_init(graph: &TypeGraph, shape: &CompositeShape) -> ObjRef {
        let fields = graph
            .fields_including_super(shape)
            .into_iter()
            .map(|field| {
                (
                    field.name.clone(),
                    Value::default_for_declared(&field.declared),
                )
            })
            .collect();
        CompositeValue::new(shape.raw.clone(), fields).into_ref()
    }

    pub fn red_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let obj = self.instantiate();
        self.scramble(&obj, source, enclosing, guard)
    }

    pub fn blue_object(
        &self,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let obj = self.red_object(source, enclosing, guard)?;
        self.scramble(&obj, source, enclosing, guard)
    }

    pub fn copy(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        self.copy_into(obj, self.shape)
    }

    pub fn copy_into_subtype(&self, obj: &ObjRef, target: &RawType) -> Result<ObjRef, SynthesisError> {
        let target_shape = self.graph.composite(target).ok_or_else(|| {
            SynthesisError::reflection(format!("no composite shape registered for `{target}`"))
        })?;
        if !self.graph.is_subtype_of(target, &self.shape.raw) {
            return Err(SynthesisError::reflection(format!(
                "`{target}` is not a subtype of `{}`",
                self.shape.raw
            )));
        }
        self.reconstruct_as(obj, target_shape)
    }

    pub fn copy_into_supertype(&self, obj: &ObjRef) -> Result<ObjRef, SynthesisError> {
        let supertype = self.shape.supertype.as_ref().ok_or_else(|| {
            SynthesisError::reflection(format!("`{}` has no supertype", self.shape.raw))
        })?;
        let target_shape = self.graph.composite(supertype).ok_or_else(|| {
            SynthesisError::reflection(format!("no composite shape registered for `{supertype}`"))
        })?;
        self.reconstruct_as(obj, target_shape)
    }

    fn reconstruct_as(
        &self,
        obj: &ObjRef,
        target: &CompositeShape,
    ) -> Result<ObjRef, SynthesisError> {
        if target.discipline.is_canonical() {
            return Err(SynthesisError::reflection(format!(
                "`{}` cannot be instantiated without constructor arguments; \
                 register an explicit factory for it",
                target.raw
            )));
        }
        self.copy_into(obj, target)
    }

    /// Zero-initializes an instance of `target`, then assigns every field
    /// the target declares from the source instance's current values.
    /// Reference-typed field values stay shared.
    fn copy_into(&self, obj: &ObjRef, target: &CompositeShape) -> Result<ObjRef, SynthesisError> {
        let copy = Self::zero_init(self.graph, target);
        {
            let original = obj.borrow();
            let mut fresh = copy.borrow_mut();
            for (name, value) in &original.fields {
                fresh.set_field(name, value.clone());
            }
        }
        Ok(copy)
    }

    pub fn scramble(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        self.scramble_fields(obj, source, enclosing, guard, &self.fields())
    }

    pub fn shallow_scramble(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let own: Vec<&FieldShape> = self.shape.fields.iter().collect();
        self.scramble_fields(obj, source, enclosing, guard, &own)
    }

    fn scramble_fields(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
        fields: &[&FieldShape],
    ) -> Result<ObjRef, SynthesisError> {
        for field in fields {
            let tag = field.declared.resolve(enclosing);
            let current = self.read_field(obj, &field.name)?;
            let replacement = source.give_other(&tag, &current, guard)?;
            obj.borrow_mut().set_field(&field.name, replacement);
        }
        Ok(obj.clone())
    }

    pub fn read_field(&self, obj: &ObjRef, name: &str) -> Result<Value, SynthesisError> {
        obj.borrow().field(name).cloned().ok_or_else(|| {
            SynthesisError::reflection(format!("`{}` has no field `{name}`", self.shape.raw))
        })
    }

    pub fn clear(
        &self,
        obj: &ObjRef,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        for field in self.fields() {
            let value = if field.non_null {
                source.give_red(&field.declared.resolve(enclosing), guard)?
            } else {
                Value::default_for_declared(&field.declared)
            };
            obj.borrow_mut().set_field(&field.name, value);
        }
        Ok(obj.clone())
    }

    pub fn with_field_set_to(
        &self,
        obj: &ObjRef,
        name: &str,
        value: Value,
    ) -> Result<ObjRef, SynthesisError> {
        if !obj.borrow_mut().set_field(name, value) {
            return Err(SynthesisError::reflection(format!(
                "`{}` has no field `{name}`",
                self.shape.raw
            )));
        }
        Ok(obj.clone())
    }

    pub fn with_changed_field(
        &self,
        obj: &ObjRef,
        name: &str,
        source: &ValueSource<'_>,
        enclosing: &TypeTag,
        guard: &TypeStack,
    ) -> Result<ObjRef, SynthesisError> {
        let field = self
            .fields()
            .into_iter()
            .find(|field| field.name == name)
            .ok_or_else(|| {
                SynthesisError::reflection(format!("`{}` has no field `{name}`", self.shape.raw))
            })?;
        let tag = field.declared.resolve(enclosing);
        let current = self.read_field(obj, name)?;
        let replacement = source.give_other(&tag, &current, guard)?;
        obj.borrow_mut().set_field(name, replacement);
        Ok(obj.clone())
    }
}
