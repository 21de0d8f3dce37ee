//! Lua code generator for PMML decision trees.
//!
//! Compiles a validated [`pmml_types::Tree`] into Lua source that drives a
//! small host runtime (`tree.NewNode`, `tree.NewTree`, the three-valued
//! combinators and set functions; see [`runtime`]).
//!
//! # Usage
//!
//! ```ignore
//! let tree: pmml_types::Tree = serde_json::from_str(json)?;
//! let lua = pmml_codegen::render_tree(&tree, &CodegenOptions::default())?;
//! ```
//!
//! Generation never panics and never produces partial output: the first
//! failure in tree order is returned as a [`CodegenError`] carrying the
//! fragment that was being written.

pub mod compiler;
pub mod error;
pub mod literal;
pub mod node;
pub mod options;
pub mod predicate;
pub mod runtime;
pub mod scope;

pub use compiler::{compile_program, compile_tree, render_tree, CompiledProgram};
pub use error::{CodegenError, CodegenResult, ErrorKind};
pub use literal::{encode_array, encode_value, quote, EncodedArray};
pub use node::{compile_node, Policy};
pub use options::CodegenOptions;
pub use predicate::{compile_predicate, BooleanOp, ComparisonOp, SetOp};
pub use scope::{line, line_if, Part, Scope, Statement};
