// eqv_synth/error - Failure modes of value synthesis
use eqv_model::{RawType, TypeTag, Value};
use thiserror::Error;

/// Errors raised by [`crate::ValueSource::request_triple`] and the accessor
/// layer.
///
/// None of these are retried, and there are no partial results: a triple is
/// either fully produced or the error is surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// The recursion guard saw the same type tag twice on one call path.
    /// Carries the ordered guard path; registering an explicit factory for
    /// any of the named types breaks the cycle.
    #[error("recursive data structure: {}", render_type_path(.path))]
    RecursiveStructure { path: Vec<TypeTag> },

    /// A canonical constructor silently changed the value of the named
    /// fields. Signals a defect in the target type, not in the engine.
    #[error("constructor of `{raw}` changed the value of field(s): {}", .fields.join(", "))]
    InvariantViolation { raw: RawType, fields: Vec<String> },

    /// A canonical constructor refused a substitute value on a validation
    /// precondition. Recoverable: the caller can register a narrower
    /// substitute for the named field.
    #[error("constructor of `{raw}` rejected the value for field `{field}`: {reason}")]
    ConstructionRejected {
        raw: RawType,
        field: String,
        value: Value,
        reason: String,
    },

    /// Anything else that went wrong while reading fields, instantiating,
    /// or invoking constructors.
    #[error("introspection failure: {message}")]
    ReflectionFailure { message: String },
}

impl SynthesisError {
    pub fn reflection(message: impl Into<String>) -> Self {
        SynthesisError::ReflectionFailure {
            message: message.into(),
        }
    }

    /// The ordered guard path, when this is a `RecursiveStructure` error.
    pub fn cycle_path(&self) -> Option<&[TypeTag]> {
        match self {
            SynthesisError::RecursiveStructure { path } => Some(path),
            _ => None,
        }
    }

    /// The field names a constructor tampered with, when this is an
    /// `InvariantViolation`.
    pub fn violated_fields(&self) -> Option<&[String]> {
        match self {
            SynthesisError::InvariantViolation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

fn render_type_path(path: &[TypeTag]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
