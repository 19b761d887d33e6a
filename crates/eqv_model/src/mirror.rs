// eqv_model/mirror - The introspectable type graph
//! Rust has no runtime reflection, so the engine introspects a
//! caller-populated graph of type shapes instead: enumerated-constant
//! types, array types, and composite types with ordered field declarations,
//! a construction discipline, and supertype links. The graph answers the
//! questions reflection would.

use crate::tag::{DeclaredType, RawType, TypeTag};
use crate::value::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Why a canonical constructor did not produce an instance.
///
/// The two cases are deliberately distinct: a rejection is recoverable by
/// supplying a narrower substitute value, an unrelated failure is not.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CtorError {
    #[error("value for field `{field}` was rejected: {reason}")]
    Rejected {
        field: String,
        value: Value,
        reason: String,
    },
    #[error("construction failed: {reason}")]
    Failed { reason: String },
}

/// Canonical constructor: receives the would-be field values in declaration
/// order and returns the values actually stored, which a validating
/// constructor may have re-derived.
pub type CanonicalCtor = Rc<dyn Fn(&[Value]) -> Result<Vec<Value>, CtorError>>;

/// How instances of a composite type come into being.
#[derive(Clone)]
pub enum Discipline {
    /// Fields are assignable after construction; instances can be created
    /// zero-initialized and populated field by field.
    DirectField,
    /// Fields are fixed for the instance's lifetime and every instance goes
    /// through the single canonical constructor.
    Canonical(CanonicalCtor),
}

impl Discipline {
    pub fn is_canonical(&self) -> bool {
        matches!(self, Discipline::Canonical(_))
    }
}

impl fmt::Debug for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::DirectField => f.write_str("DirectField"),
            Discipline::Canonical(_) => f.write_str("Canonical"),
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub name: String,
    pub declared: DeclaredType,
    /// Caller-supplied exemption flag: this field must never be probed with
    /// a null or default value. The engine consumes the flag, it never
    /// computes it.
    pub non_null: bool,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
            non_null: false,
        }
    }

    pub fn non_null(mut self) -> Self {
        self.non_null = true;
        self
    }
}

/// Structure of a composite type.
#[derive(Debug, Clone)]
pub struct CompositeShape {
    pub raw: RawType,
    /// Names of the declared type parameters; field declarations reference
    /// them by position.
    pub params: Vec<String>,
    pub fields: Vec<FieldShape>,
    pub discipline: Discipline,
    pub supertype: Option<RawType>,
}

impl CompositeShape {
    pub fn new(raw: impl Into<RawType>, fields: Vec<FieldShape>, discipline: Discipline) -> Self {
        Self {
            raw: raw.into(),
            params: Vec::new(),
            fields,
            discipline,
            supertype: None,
        }
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_supertype(mut self, supertype: impl Into<RawType>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }
}

/// Shape of any type the graph can describe.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// Closed set of named singleton constants.
    Enum { constants: Vec<String> },
    /// Array type with a fixed component type.
    Array { component: TypeTag },
    Composite(CompositeShape),
}

/// Every type the engine can introspect, keyed by raw type.
///
/// Callers describe their types once, at verification-run start; the engine
/// only ever walks the descriptions.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    shapes: HashMap<RawType, TypeShape>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, raw: impl Into<RawType>, shape: TypeShape) {
        self.shapes.insert(raw.into(), shape);
    }

    pub fn register_composite(&mut self, shape: CompositeShape) {
        self.shapes
            .insert(shape.raw.clone(), TypeShape::Composite(shape));
    }

    pub fn shape_of(&self, raw: &RawType) -> Option<&TypeShape> {
        self.shapes.get(raw)
    }

    pub fn composite(&self, raw: &RawType) -> Option<&CompositeShape> {
        match self.shapes.get(raw) {
            Some(TypeShape::Composite(shape)) => Some(shape),
            _ => None,
        }
    }

    /// All fields visible on instances of the given composite type: its own
    /// declarations first, then the supertype chain's. Malformed supertype
    /// cycles terminate instead of looping.
    pub fn fields_including_super<'g>(&'g self, shape: &'g CompositeShape) -> Vec<&'g FieldShape> {
        let mut result: Vec<&FieldShape> = shape.fields.iter().collect();
        let mut seen: HashSet<&RawType> = HashSet::new();
        seen.insert(&shape.raw);

        let mut next = shape.supertype.as_ref();
        while let Some(raw) = next {
            if !seen.insert(raw) {
                break;
            }
            match self.composite(raw) {
                Some(ancestor) => {
                    result.extend(ancestor.fields.iter());
                    next = ancestor.supertype.as_ref();
                }
                None => break,
            }
        }
        result
    }

    /// Whether `candidate` equals `ancestor` or reaches it through its
    /// supertype chain.
    pub fn is_subtype_of(&self, candidate: &RawType, ancestor: &RawType) -> bool {
        if candidate == ancestor {
            return true;
        }
        let mut seen: HashSet<&RawType> = HashSet::new();
        let mut next = self
            .composite(candidate)
            .and_then(|shape| shape.supertype.as_ref());
        while let Some(raw) = next {
            if raw == ancestor {
                return true;
            }
            if !seen.insert(raw) {
                break;
            }
            next = self.composite(raw).and_then(|shape| shape.supertype.as_ref());
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(raw: &str, fields: Vec<FieldShape>) -> CompositeShape {
        CompositeShape::new(raw, fields, Discipline::DirectField)
    }

    #[test]
    fn field_iteration_walks_the_supertype_chain() {
        let mut graph = TypeGraph::new();
        graph.register_composite(direct(
            "animal",
            vec![FieldShape::new("name", DeclaredType::simple("string"))],
        ));
        graph.register_composite(
            direct(
                "dog",
                vec![FieldShape::new("breed", DeclaredType::simple("string"))],
            )
            .with_supertype("animal"),
        );

        let dog = graph.composite(&RawType::new("dog")).unwrap();
        let names: Vec<&str> = graph
            .fields_including_super(dog)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["breed", "name"]);
    }

    #[test]
    fn subtype_queries_follow_supertype_links() {
        let mut graph = TypeGraph::new();
        graph.register_composite(direct("animal", Vec::new()));
        graph.register_composite(direct("dog", Vec::new()).with_supertype("animal"));

        assert!(graph.is_subtype_of(&RawType::new("dog"), &RawType::new("animal")));
        assert!(graph.is_subtype_of(&RawType::new("dog"), &RawType::new("dog")));
        assert!(!graph.is_subtype_of(&RawType::new("animal"), &RawType::new("dog")));
    }
}
