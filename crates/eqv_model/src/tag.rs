// eqv_model/tag - Raw type names, type tags, and declared field types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the distinguished "unknown" raw type. It shows up wherever no
/// type information is available: wildcard arguments, raw container usage,
/// and untyped top-level requests.
pub const UNKNOWN_TYPE: &str = "?";

/// Well-known raw type names, shared between the type graph and the
/// built-in factory seed.
pub mod names {
    pub const BOOL: &str = "bool";
    pub const BYTE: &str = "byte";
    pub const SHORT: &str = "short";
    pub const INT: &str = "int";
    pub const LONG: &str = "long";
    pub const FLOAT: &str = "float";
    pub const DOUBLE: &str = "double";
    pub const CHAR: &str = "char";
    pub const STRING: &str = "string";
    /// Opaque object-like type with no structure of its own.
    pub const ANY: &str = "any";
    pub const OPTION: &str = "option";
    pub const LIST: &str = "list";
    pub const SET: &str = "set";
    pub const MAP: &str = "map";
}

/// Identifier for a raw (unparameterized) type.
///
/// Types are identified by name, like the runtime they mirror. A dedicated
/// newtype keeps raw-type names from mixing with field names and enum
/// constants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RawType(String);

impl RawType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The distinguished unknown raw type.
    pub fn unknown() -> Self {
        Self(UNKNOWN_TYPE.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_TYPE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawType {
    fn from(value: &str) -> Self {
        RawType::new(value)
    }
}

impl From<String> for RawType {
    fn from(value: String) -> Self {
        RawType::new(value)
    }
}

/// A possibly parameterized type: a raw type plus an ordered list of
/// type-tag arguments.
///
/// Tags are pure data. Two tags are equal iff their raw types and all their
/// arguments are equal, recursively. Rendering is only used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag {
    raw: RawType,
    args: Vec<TypeTag>,
}

impl TypeTag {
    pub fn new(raw: impl Into<RawType>, args: Vec<TypeTag>) -> Self {
        Self {
            raw: raw.into(),
            args,
        }
    }

    /// Tag for a type without arguments.
    pub fn simple(raw: impl Into<RawType>) -> Self {
        Self::new(raw, Vec::new())
    }

    /// The distinguished null/untyped tag: no generic information at all.
    pub fn unknown() -> Self {
        Self::simple(RawType::unknown())
    }

    pub fn is_unknown(&self) -> bool {
        self.raw.is_unknown()
    }

    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    pub fn args(&self) -> &[TypeTag] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&TypeTag> {
        self.args.get(index)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeTag {
    fn from(value: &str) -> Self {
        TypeTag::simple(value)
    }
}

/// A field or component type as it appears in a declaration, before the
/// enclosing type's arguments are known.
///
/// Type parameters are referenced positionally: `Variable(0)` points at the
/// first argument of the enclosing tag, so resolution needs no name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredType {
    Concrete {
        raw: RawType,
        args: Vec<DeclaredType>,
    },
    Variable(usize),
    Wildcard,
}

impl DeclaredType {
    pub fn simple(raw: impl Into<RawType>) -> Self {
        DeclaredType::Concrete {
            raw: raw.into(),
            args: Vec::new(),
        }
    }

    pub fn of(raw: impl Into<RawType>, args: Vec<DeclaredType>) -> Self {
        DeclaredType::Concrete {
            raw: raw.into(),
            args,
        }
    }

    pub fn variable(index: usize) -> Self {
        DeclaredType::Variable(index)
    }

    /// Resolves this declaration against the enclosing type's tag.
    ///
    /// A positional reference takes the enclosing tag's argument at that
    /// position; references the enclosing tag cannot satisfy (raw usage)
    /// and wildcards degrade to the unknown tag.
    pub fn resolve(&self, enclosing: &TypeTag) -> TypeTag {
        match self {
            DeclaredType::Concrete { raw, args } => TypeTag::new(
                raw.clone(),
                args.iter().map(|arg| arg.resolve(enclosing)).collect(),
            ),
            DeclaredType::Variable(index) => enclosing
                .arg(*index)
                .cloned()
                .unwrap_or_else(TypeTag::unknown),
            DeclaredType::Wildcard => TypeTag::unknown(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_equal_iff_raw_and_arguments_match() {
        let a = TypeTag::new(names::LIST, vec![TypeTag::simple(names::STRING)]);
        let b = TypeTag::new(names::LIST, vec![TypeTag::simple(names::STRING)]);
        let c = TypeTag::new(names::LIST, vec![TypeTag::simple(names::INT)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, TypeTag::simple(names::LIST));
    }

    #[test]
    fn renders_nested_arguments() {
        let tag = TypeTag::new(
            names::MAP,
            vec![
                TypeTag::simple(names::STRING),
                TypeTag::new(names::LIST, vec![TypeTag::simple(names::INT)]),
            ],
        );
        assert_eq!(tag.to_string(), "map<string, list<int>>");
    }

    #[test]
    fn variable_resolves_positionally() {
        let enclosing = TypeTag::new(
            "pair",
            vec![TypeTag::simple(names::INT), TypeTag::simple(names::STRING)],
        );
        assert_eq!(
            DeclaredType::variable(1).resolve(&enclosing),
            TypeTag::simple(names::STRING)
        );
    }

    #[test]
    fn unsatisfied_variable_degrades_to_unknown() {
        let raw_usage = TypeTag::simple("pair");
        assert!(DeclaredType::variable(0).resolve(&raw_usage).is_unknown());
        assert!(DeclaredType::Wildcard.resolve(&raw_usage).is_unknown());
    }

    #[test]
    fn concrete_declaration_resolves_nested_variables() {
        let enclosing = TypeTag::new("holder", vec![TypeTag::simple(names::INT)]);
        let declared = DeclaredType::of(names::LIST, vec![DeclaredType::variable(0)]);
        assert_eq!(
            declared.resolve(&enclosing),
            TypeTag::new(names::LIST, vec![TypeTag::simple(names::INT)])
        );
    }
}
