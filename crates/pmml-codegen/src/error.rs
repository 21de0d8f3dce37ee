//! Codegen error types.

use pmml_types::ArrayError;
use thiserror::Error;

/// What went wrong while generating Lua.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A comparison, boolean or set operator outside the supported set.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    /// A required sub-element (array, value, predicate, node id) is absent.
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// An array element does not parse under its declared type.
    #[error("cannot encode literal: {0}")]
    LiteralEncoding(String),

    /// An array declares an element type other than int, real or string.
    #[error("unsupported array element type '{0}'")]
    UnsupportedElementType(String),

    /// Declared and actual array length differ (strict mode only).
    #[error("array declares {declared} elements but holds {actual}")]
    ArrayLengthMismatch { declared: usize, actual: usize },

    /// A model name cannot be used as a Lua function name.
    #[error("'{0}' is not a valid Lua identifier")]
    InvalidIdentifier(String),

    /// Two models in one program share a name.
    #[error("model '{0}' is defined more than once")]
    DuplicateModel(String),
}

impl ErrorKind {
    /// Stable machine-readable name of the error class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperator(_) => "unsupported_operator",
            Self::MissingElement(_) => "missing_element",
            Self::LiteralEncoding(_) => "literal_encoding",
            Self::UnsupportedElementType(_) => "unsupported_element_type",
            Self::ArrayLengthMismatch { .. } => "array_length_mismatch",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::DuplicateModel(_) => "duplicate_model",
        }
    }
}

impl From<ArrayError> for ErrorKind {
    fn from(err: ArrayError) -> Self {
        match err {
            ArrayError::UnsupportedType(tag) => Self::UnsupportedElementType(tag),
            other => Self::LiteralEncoding(other.to_string()),
        }
    }
}

/// A codegen failure together with the fragment of Lua that was being
/// assembled when it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", location(.fragment))]
pub struct CodegenError {
    #[source]
    pub kind: ErrorKind,
    /// Text accumulated by the failing statement; may be empty.
    pub fragment: String,
}

impl CodegenError {
    pub fn new(kind: ErrorKind, fragment: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
        }
    }
}

impl From<ErrorKind> for CodegenError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, "")
    }
}

fn location(fragment: &str) -> String {
    if fragment.is_empty() {
        String::new()
    } else {
        format!(" (at `{fragment}`)")
    }
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
