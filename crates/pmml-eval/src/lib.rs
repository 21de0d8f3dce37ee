//! Reference tree-walking evaluator.
//!
//! Evaluates decision trees natively with the same semantics the generated
//! Lua relies on from its runtime: three-valued predicates, first-match
//! child order and the missing-value strategies. Used as the golden
//! reference when checking what generated code should compute.

pub mod error;
pub mod evaluator;
pub mod predicate;
pub mod record;
pub mod truth;

pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, Prediction};
pub use predicate::evaluate_predicate;
pub use record::{lookup, record, Datum, Record};
pub use truth::Truth;
