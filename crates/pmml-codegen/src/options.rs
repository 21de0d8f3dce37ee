//! Code generation options.

use serde::{Deserialize, Serialize};

/// Knobs for the generated Lua. Every field has a default, so a partial
/// JSON object deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// One level of indentation.
    pub indent: String,
    /// Module path passed to `require` in the program prelude.
    pub runtime_module: String,
    /// Reject arrays whose declared length differs from their element count.
    pub strict_array_length: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            runtime_module: "tree".to_string(),
            strict_array_length: false,
        }
    }
}
