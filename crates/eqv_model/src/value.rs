// eqv_model/value - Dynamic runtime values and value triples
use crate::tag::{names, DeclaredType, RawType};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared reference to a composite instance.
///
/// Cloning an `ObjRef` clones the pointer, not the instance, so a field
/// holding an `ObjRef` is a reference-typed field: copies of the enclosing
/// object share it. `Rc::ptr_eq` is instance identity.
pub type ObjRef = Rc<RefCell<CompositeValue>>;

/// Field storage of a composite instance, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeValue {
    pub ty: RawType,
    pub fields: Vec<(String, Value)>,
}

impl CompositeValue {
    pub fn new(ty: RawType, fields: Vec<(String, Value)>) -> Self {
        Self { ty, fields }
    }

    pub fn into_ref(self) -> ObjRef {
        Rc::new(RefCell::new(self))
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field.as_str() == name)
            .map(|(_, value)| value)
    }

    /// Overwrites the named field. Returns false when the instance has no
    /// such field.
    pub fn set_field(&mut self, name: &str, value: Value) -> bool {
        for (field, slot) in &mut self.fields {
            if field.as_str() == name {
                *slot = value;
                return true;
            }
        }
        false
    }
}

/// A dynamic runtime value.
///
/// Structural equality is the equivalence every synthesized pair is
/// measured against. Composite instances compare by content but carry
/// reference identity through [`ObjRef`], so "equivalent but not the same
/// instance" is observable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Char(char),
    /// Opaque scalar of a named type, distinguishable only by token.
    Token { ty: RawType, token: String },
    /// Constant of an enumerated type.
    EnumConstant { ty: RawType, constant: String },
    Array(Vec<Value>),
    /// Single-element container; `None` is the empty container.
    Holder {
        ty: RawType,
        item: Option<Box<Value>>,
    },
    /// Ordered sequence container.
    Seq { ty: RawType, items: Vec<Value> },
    /// Keyed container.
    Map {
        ty: RawType,
        entries: Vec<(Value, Value)>,
    },
    Object(ObjRef),
}

impl Value {
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    pub fn token(ty: impl Into<RawType>, token: impl Into<String>) -> Self {
        Value::Token {
            ty: ty.into(),
            token: token.into(),
        }
    }

    pub fn enum_constant(ty: impl Into<RawType>, constant: impl Into<String>) -> Self {
        Value::EnumConstant {
            ty: ty.into(),
            constant: constant.into(),
        }
    }

    pub fn object(composite: CompositeValue) -> Self {
        Value::Object(composite.into_ref())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Instance identity: true only when both sides are the same composite
    /// instance. Value-semantic variants never share identity.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The zero-initialization value for a field of the given raw type:
    /// scalar types get their zero value, reference types start null.
    pub fn default_for(raw: &RawType) -> Value {
        match raw.as_str() {
            names::BOOL => Value::Bool(false),
            names::BYTE | names::SHORT | names::INT | names::LONG => Value::Int(0),
            names::FLOAT | names::DOUBLE => Value::Float(0.0),
            names::CHAR => Value::Char('\0'),
            _ => Value::Null,
        }
    }

    /// Zero-initialization value for a declared field type. Only concrete
    /// declarations can name a scalar; everything else starts null.
    pub fn default_for_declared(declared: &DeclaredType) -> Value {
        match declared {
            DeclaredType::Concrete { raw, .. } => Value::default_for(raw),
            DeclaredType::Variable(_) | DeclaredType::Wildcard => Value::Null,
        }
    }
}

/// The red/blue/redCopy sample triple: an unequal pair plus a same-value
/// pair that shares no instance identity with `red`. This, not a single
/// value, is the unit of exchange throughout the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Triple {
    pub red: Value,
    pub blue: Value,
    pub red_copy: Value,
}

impl Triple {
    pub fn new(red: Value, blue: Value, red_copy: Value) -> Self {
        Self {
            red,
            blue,
            red_copy,
        }
    }

    /// All three slots carry the same value, for types with only one
    /// inhabitant.
    pub fn uniform(value: Value) -> Self {
        Self {
            red: value.clone(),
            blue: value.clone(),
            red_copy: value,
        }
    }

    pub fn map(self, f: impl Fn(Value) -> Value) -> Triple {
        Triple {
            red: f(self.red),
            blue: f(self.blue),
            red_copy: f(self.red_copy),
        }
    }

    /// Collapse-rule support: when the blue slot is indistinguishable from
    /// the red slot, replace it with the given alternative (typically the
    /// empty container).
    pub fn swap_blue_if_equal_to_red(self, alternative: impl FnOnce() -> Value) -> Triple {
        if self.blue == self.red {
            Triple {
                blue: alternative(),
                ..self
            }
        } else {
            self
        }
    }
}
