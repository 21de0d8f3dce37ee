use thiserror::Error;

/// Errors raised while splitting an array payload into typed elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// A token does not parse under the declared element type.
    #[error("'{token}' is not a valid {expected} element")]
    InvalidElement {
        token: String,
        expected: &'static str,
    },

    /// A `"` opened a quoted token that never closes.
    #[error("unterminated quoted string starting at byte {0}")]
    UnterminatedString(usize),

    /// The array declares an element type outside `int`, `real` and `string`.
    #[error("unsupported array type '{0}'")]
    UnsupportedType(String),
}
