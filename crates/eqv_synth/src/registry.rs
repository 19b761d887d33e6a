// eqv_synth/registry - Raw-type-keyed factory registry
use crate::error::SynthesisError;
use crate::source::ValueSource;
use crate::stack::TypeStack;
use eqv_model::{RawType, Triple, TypeTag, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Produces the red/blue/redCopy triple for one raw type.
///
/// The registry keys on the raw type only; a factory resolves the tag's
/// generic arguments itself, recursing through `source` for element values
/// and threading `guard` so nested recursion is still caught.
pub trait ValueFactory {
    fn create(
        &self,
        tag: &TypeTag,
        source: &ValueSource<'_>,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError>;
}

/// A factory that hands out clones of a fixed triple. Fits scalar types
/// whose samples carry no structure worth recomputing.
pub struct SimpleFactory {
    triple: Triple,
}

impl SimpleFactory {
    /// `red_copy` is a fresh clone of `red`: equivalent, value-semantic,
    /// sharing no instance identity.
    pub fn new(red: Value, blue: Value) -> Self {
        let red_copy = red.clone();
        Self {
            triple: Triple::new(red, blue, red_copy),
        }
    }

    pub fn of_triple(triple: Triple) -> Self {
        Self { triple }
    }
}

impl ValueFactory for SimpleFactory {
    fn create(
        &self,
        _tag: &TypeTag,
        _source: &ValueSource<'_>,
        _guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        Ok(self.triple.clone())
    }
}

/// Closure adapter for factories that need the tag or recursion into the
/// source.
pub struct FnFactory<F> {
    f: F,
}

impl<F> FnFactory<F>
where
    F: Fn(&TypeTag, &ValueSource<'_>, &TypeStack) -> Result<Triple, SynthesisError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ValueFactory for FnFactory<F>
where
    F: Fn(&TypeTag, &ValueSource<'_>, &TypeStack) -> Result<Triple, SynthesisError>,
{
    fn create(
        &self,
        tag: &TypeTag,
        source: &ValueSource<'_>,
        guard: &TypeStack,
    ) -> Result<Triple, SynthesisError> {
        (self.f)(tag, source, guard)
    }
}

/// Mapping from raw type to value factory.
///
/// Last registration wins, so caller-supplied factories override the
/// built-in seed. The registry is a plain value owned by one verification
/// run; isolation between runs comes from [`FactoryRegistry::merge_from`]
/// producing a new instance instead of mutating a shared one.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<RawType, Rc<dyn ValueFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `factory` with `raw`, replacing any existing entry.
    pub fn register(&mut self, raw: impl Into<RawType>, factory: Rc<dyn ValueFactory>) {
        self.factories.insert(raw.into(), factory);
    }

    /// Registers a fixed red/blue pair for a scalar type.
    pub fn register_simple(&mut self, raw: impl Into<RawType>, red: Value, blue: Value) {
        self.register(raw, Rc::new(SimpleFactory::new(red, blue)));
    }

    pub fn lookup(&self, raw: &RawType) -> Option<Rc<dyn ValueFactory>> {
        self.factories.get(raw).cloned()
    }

    pub fn contains(&self, raw: &RawType) -> bool {
        self.factories.contains_key(raw)
    }

    /// A new registry combining `self` and `other`; `other` wins on
    /// conflicts. Neither input is mutated.
    #[must_use]
    pub fn merge_from(&self, other: &FactoryRegistry) -> FactoryRegistry {
        let mut combined = self.factories.clone();
        for (raw, factory) in &other.factories {
            combined.insert(raw.clone(), Rc::clone(factory));
        }
        FactoryRegistry {
            factories: combined,
        }
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&RawType> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("FactoryRegistry")
            .field("types", &keys)
            .finish()
    }
}
