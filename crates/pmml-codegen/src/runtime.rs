//! Names from the host runtime contract.
//!
//! Generated code reaches the runtime through a single module alias and a
//! handful of fixed local names:
//!
//! ```text
//! tree.NewNode(id, fn, children...)   node registration
//! tree.NewTree(strategy, root).eval(v) tree evaluation entry point
//! tree.And / Or / Xor / Surrogate      three-valued combinators ({...; n=k})
//! tree.IsIn / IsNotIn                  set membership
//! t.last, t.miss(label, count, conf)   evaluation state
//! n.next(t, v), n.children[id].eval    node navigation
//! ```

/// Local alias of the runtime module.
pub const RUNTIME_ALIAS: &str = "tree";
/// Input record parameter.
pub const INPUT: &str = "v";
/// Evaluation state parameter of node evaluators.
pub const STATE: &str = "t";
/// Node parameter of node evaluators.
pub const NODE: &str = "n";
/// Local holding a node's three-valued predicate result.
pub const RESULT: &str = "x";
/// Global table caching constructed models by name.
pub const REGISTRY: &str = "model";

pub const NEW_NODE: &str = "NewNode";
pub const NEW_TREE: &str = "NewTree";

/// Lua 5.x reserved words.
pub const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Whether `name` can be written as a bare Lua identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic());
    starts_ok
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !LUA_KEYWORDS.contains(&name)
}
