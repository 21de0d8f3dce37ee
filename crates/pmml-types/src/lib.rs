//! Shared types for the PMML-to-Lua compiler.
//!
//! This crate defines the decision-tree document model consumed by the code
//! generator and the reference evaluator: trees, nodes, predicates, array
//! literals and scalar values. Every type derives serde so a model document
//! can be loaded from JSON by the caller.

mod array;
mod error;
mod predicate;
mod tree;
mod value;

pub use array::{Array, ArrayType, ArrayValues};
pub use error::ArrayError;
pub use predicate::{CompoundPredicate, Predicate, SimplePredicate, SimpleSetPredicate};
pub use tree::{MissingValueStrategy, NoTrueChildStrategy, Node, ScoreDistribution, Tree};
pub use value::Value;
