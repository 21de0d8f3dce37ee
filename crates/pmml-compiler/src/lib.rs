//! PMML-to-Lua compiler: orchestrates the full pipeline.
//!
//! ```text
//! JSON model document → serde → Tree[] → Lua codegen → source + SHA-256
//! ```
//!
//! [`compile`] returns a typed result; [`compile_to_result`] wraps the same
//! pipeline in a serialisable [`CompileResult`] for hosts that exchange
//! JSON.

use pmml_codegen::{compile_program, CodegenError, CodegenOptions, CompiledProgram};
use pmml_types::Tree;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, instrument};

/// A document holding one or more tree models and the generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub options: CodegenOptions,
    pub models: Vec<Tree>,
}

/// Pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The document is not valid JSON or does not match the model schema.
    #[error("invalid model document: {0}")]
    Document(String),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Stable machine-readable name of the error class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Document(_) => "invalid_document",
            Self::Codegen(e) => e.kind.code(),
        }
    }
}

/// Generated Lua with its entry points and content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub lua: String,
    pub entry_points: Vec<String>,
    /// Lowercase hex SHA-256 of `lua`.
    pub content_hash: String,
}

/// Parse a JSON model document.
pub fn load(json: &str) -> Result<ModelDocument, CompileError> {
    serde_json::from_str(json).map_err(|e| CompileError::Document(e.to_string()))
}

/// Compile a JSON model document to Lua.
#[instrument(skip_all, fields(bytes = json.len()))]
pub fn compile(json: &str) -> Result<CompileOutput, CompileError> {
    let document = load(json)?;
    compile_document(&document)
}

/// Compile an already loaded document.
pub fn compile_document(document: &ModelDocument) -> Result<CompileOutput, CompileError> {
    let CompiledProgram {
        source,
        entry_points,
    } = compile_program(&document.models, &document.options)?;
    let content_hash = content_hash(&source);
    debug!(hash = %content_hash, models = entry_points.len(), "compiled");
    Ok(CompileOutput {
        lua: source,
        entry_points,
        content_hash,
    })
}

/// Lowercase hex SHA-256 of generated source.
pub fn content_hash(source: &str) -> String {
    Sha256::digest(source.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Structured error for [`CompileResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    /// Lua being written when generation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl From<&CompileError> for ErrorReport {
    fn from(err: &CompileError) -> Self {
        let fragment = match err {
            CompileError::Codegen(e) if !e.fragment.is_empty() => Some(e.fragment.clone()),
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            fragment,
        }
    }
}

/// Serialisable outcome of a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    pub lua: Option<String>,
    #[serde(default)]
    pub entry_points: Vec<String>,
    pub content_hash: Option<String>,
    pub error: Option<ErrorReport>,
}

/// Compile and package the outcome, success or failure, as a
/// [`CompileResult`].
pub fn compile_to_result(json: &str) -> CompileResult {
    match compile(json) {
        Ok(out) => CompileResult {
            success: true,
            lua: Some(out.lua),
            entry_points: out.entry_points,
            content_hash: Some(out.content_hash),
            error: None,
        },
        Err(err) => CompileResult {
            success: false,
            lua: None,
            entry_points: Vec::new(),
            content_hash: None,
            error: Some(ErrorReport::from(&err)),
        },
    }
}
