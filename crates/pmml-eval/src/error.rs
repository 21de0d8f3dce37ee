//! Runtime error types for the reference evaluator.

use pmml_types::ArrayError;
use thiserror::Error;

/// Evaluation error: malformed predicates and Lua runtime faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Operator outside the supported set.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),
    /// A required sub-element is absent.
    #[error("missing required element: {0}")]
    MissingElement(String),
    /// Array payload does not parse under its element type.
    #[error("invalid array: {0}")]
    InvalidArray(#[from] ArrayError),
    /// Ordering comparison between incompatible values; Lua raises here.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// A default child id that names no direct child.
    #[error("node '{node}' has no child '{child}'")]
    UnknownChild { node: String, child: String },
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
