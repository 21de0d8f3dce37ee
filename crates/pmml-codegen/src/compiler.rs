//! Tree and program assembly.
//!
//! A tree compiles to one global Lua function named after the model. The
//! constructed node graph is cached in the global `model` registry so
//! repeated calls reuse it:
//!
//! ```lua
//! function Golf(v)
//!     model = model or {}
//!     model.Golf = model.Golf or
//!     tree.NewNode('1', function(t, n, v)
//!         ...
//!     end)
//!     return tree.NewTree('none', model.Golf).eval(v)
//! end
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use pmml_types::Tree;

use crate::error::{CodegenResult, ErrorKind};
use crate::node::{compile_node, Policy};
use crate::options::CodegenOptions;
use crate::runtime::{self, INPUT, NEW_TREE, REGISTRY, RUNTIME_ALIAS};
use crate::scope::{line, Part, Scope, Statement};

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// Compile a tree into its model function.
#[instrument(skip_all, fields(model = %tree.model_name, strategy = %tree.missing_value_strategy))]
pub fn compile_tree(tree: &Tree, options: &CodegenOptions) -> Scope {
    let name = tree.model_name.as_str();
    if !runtime::is_identifier(name) {
        return Scope::new().with(Statement::new().fail(ErrorKind::InvalidIdentifier(name.to_string())));
    }

    let root = compile_node(&tree.node, Policy::of(tree), options);
    let body = Scope::new()
        .with(line(format!("{REGISTRY} = {REGISTRY} or {{}}")))
        .with(line(format!("{REGISTRY}.{name} = {REGISTRY}.{name} or")))
        .with(Part::inline(root))
        .with(line(format!(
            "return {RUNTIME_ALIAS}.{NEW_TREE}('{}', {REGISTRY}.{name}).eval({INPUT})",
            tree.missing_value_strategy
        )));

    Scope::function(name, &[INPUT], body)
}

/// Compile and render a single tree.
pub fn render_tree(tree: &Tree, options: &CodegenOptions) -> CodegenResult<String> {
    compile_tree(tree, options).render(&options.indent)
}

/// A rendered Lua program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledProgram {
    pub source: String,
    /// Model function names, in input order.
    pub entry_points: Vec<String>,
}

/// Compile several trees into one program sharing a runtime import.
#[instrument(skip_all, fields(models = trees.len()))]
pub fn compile_program(trees: &[Tree], options: &CodegenOptions) -> CodegenResult<CompiledProgram> {
    let module = serde_json::to_string(&options.runtime_module)
        .map_err(|e| ErrorKind::LiteralEncoding(e.to_string()))?;

    let mut program = Scope::new().with(line(format!("local {RUNTIME_ALIAS} = require({module})")));
    let mut seen = HashSet::new();
    let mut entry_points = Vec::with_capacity(trees.len());

    for tree in trees {
        if program.error().is_some() {
            break;
        }
        if !seen.insert(tree.model_name.as_str()) {
            program.push(
                Statement::new().fail(ErrorKind::DuplicateModel(tree.model_name.clone())),
            );
            break;
        }
        let function = compile_tree(tree, options);
        if let Some(name) = function.name() {
            entry_points.push(name.to_string());
        }
        program.push(line(""));
        program.push(Part::inline(function));
    }

    let source = program.render(&options.indent)?;
    debug!(bytes = source.len(), "program rendered");
    Ok(CompiledProgram {
        source,
        entry_points,
    })
}
