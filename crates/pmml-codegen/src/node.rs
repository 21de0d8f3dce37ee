//! Node compilation.
//!
//! Each node becomes a `tree.NewNode(id, evaluator, children...)` call.
//! The evaluator binds the node's three-valued predicate to `x` and
//! branches on it:
//!
//! ```lua
//! tree.NewNode('2', function(t, n, v)
//!     local x = v.outlook and v.outlook == 'sunny'
//!     if x then
//!         t.last = 'will play'
//!         n.next(t, v)
//!         return true
//!     elseif x == nil then
//!         return true
//!     end
//!     return false
//! end,
//!     tree.NewNode('3', ...),
//!     tree.NewNode('4', ...))
//! ```
//!
//! Returning `true` stops evaluation of the enclosing sibling list;
//! `false` moves on to the next sibling.

use tracing::trace;

use pmml_types::{MissingValueStrategy, NoTrueChildStrategy, Node, Tree};

use crate::error::ErrorKind;
use crate::literal::quote;
use crate::options::CodegenOptions;
use crate::predicate::compile_predicate;
use crate::runtime::{INPUT, NEW_NODE, NODE, RESULT, RUNTIME_ALIAS, STATE};
use crate::scope::{line, line_if, Scope, Statement};

/// Tree-wide evaluation policy, passed explicitly to every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    pub missing_value: MissingValueStrategy,
    pub no_true_child: NoTrueChildStrategy,
}

impl Policy {
    pub fn new(missing_value: MissingValueStrategy) -> Self {
        Self {
            missing_value,
            no_true_child: NoTrueChildStrategy::default(),
        }
    }

    /// The policy declared by a tree.
    pub fn of(tree: &Tree) -> Self {
        Self {
            missing_value: tree.missing_value_strategy,
            no_true_child: tree.no_true_child_strategy,
        }
    }

    fn has_missing_branch(self) -> bool {
        self.missing_value != MissingValueStrategy::None
    }

    fn aggregates(self) -> bool {
        matches!(
            self.missing_value,
            MissingValueStrategy::WeightedConfidence | MissingValueStrategy::AggregateNodes
        )
    }
}

/// Compile a node and its descendants into one registration expression.
pub fn compile_node(node: &Node, policy: Policy, options: &CodegenOptions) -> Scope {
    register(node, policy, options, "")
}

/// `suffix` is appended to the registration's closing line; it carries the
/// separator or closing parenthesis owed to the parent.
fn register(node: &Node, policy: Policy, options: &CodegenOptions, suffix: &str) -> Scope {
    trace!(id = %node.id, children = node.children.len(), "compiling node");

    let header = line(format!(
        "{RUNTIME_ALIAS}.{NEW_NODE}({}, function({STATE}, {NODE}, {INPUT})",
        quote(&node.id)
    ));
    let scope = Scope::new().with(header).with(evaluator(node, policy, options));

    if node.is_leaf() {
        return scope.with(line(format!("end){suffix}")));
    }

    let mut scope = scope.with(line("end,"));
    let last = node.children.len() - 1;
    for (i, child) in node.children.iter().enumerate() {
        let tail = if i == last {
            format!("){suffix}")
        } else {
            ",".to_string()
        };
        scope.push(register(child, policy, options, &tail));
    }
    scope
}

fn evaluator(node: &Node, policy: Policy, options: &CodegenOptions) -> Scope {
    let predicate = match &node.predicate {
        Some(p) => compile_predicate(p, options),
        None => Statement::new().fail(ErrorKind::MissingElement(format!(
            "predicate of node '{}'",
            node.id
        ))),
    };

    Scope::new()
        .with(line(format!("local {RESULT} = ")).statement(predicate))
        .with(line(format!("if {RESULT} then")))
        .with(matched(node, policy))
        .with(line_if(
            policy.has_missing_branch(),
            format!("elseif {RESULT} == nil then"),
        ))
        .with_if(policy.has_missing_branch(), unresolved(node, policy))
        .with(line("end"))
        .with(line("return false"))
}

/// Body of the `x == true` branch.
fn matched(node: &Node, policy: Policy) -> Scope {
    let scope = Scope::new();
    let scope = match &node.score {
        Some(score) => scope.with(line(format!("{STATE}.last = {}", quote(score)))),
        None => scope,
    };
    if node.is_leaf() {
        return scope.with(line("return true"));
    }
    let descend = Statement::new().call(&format!("{NODE}.next"), &[STATE, INPUT]);
    let scope = match policy.no_true_child {
        NoTrueChildStrategy::ReturnLastPrediction => scope.with(descend),
        NoTrueChildStrategy::ReturnNullPrediction => scope.with(
            line("if not ")
                .statement(descend)
                .append(format!(" then {STATE}.last = nil end")),
        ),
    };
    scope.with(line("return true"))
}

/// Body of the `x == nil` branch.
fn unresolved(node: &Node, policy: Policy) -> Scope {
    let mut scope = Scope::new();
    if policy.aggregates() {
        for d in &node.distributions {
            scope.push(line(format!(
                "{STATE}.miss({}, {}, {})",
                quote(&d.value),
                d.record_count,
                d.confidence
            )));
        }
    }

    match policy.missing_value {
        MissingValueStrategy::DefaultChild => match node.default_child.as_deref() {
            Some(id) if node.child(id).is_some() => scope
                .with(Statement::new().call(
                    &format!("{NODE}.children[{}].eval", quote(id)),
                    &[STATE, INPUT],
                ))
                .with(line("return true")),
            Some(id) => scope.with(Statement::new().fail(ErrorKind::MissingElement(format!(
                "default child '{id}' of node '{}'",
                node.id
            )))),
            None => scope,
        },
        MissingValueStrategy::NullPrediction => scope
            .with(line(format!("{STATE}.last = nil")))
            .with(line("return true")),
        MissingValueStrategy::LastPrediction => scope.with(line("return true")),
        MissingValueStrategy::None
        | MissingValueStrategy::WeightedConfidence
        | MissingValueStrategy::AggregateNodes => scope,
    }
}
