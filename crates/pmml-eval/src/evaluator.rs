//! Tree evaluation.
//!
//! Walks a tree exactly the way the generated node evaluators do: each node
//! returns `true` to stop its sibling list and `false` to let the next
//! sibling try.

use tracing::{instrument, trace};

use pmml_types::{MissingValueStrategy, NoTrueChildStrategy, Node, Tree};

use crate::error::{EvalError, EvalResult};
use crate::predicate::evaluate_predicate;
use crate::record::Record;
use crate::truth::Truth;

/// Outcome of evaluating a tree against one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted label, if any.
    pub score: Option<String>,
    /// Whether a leaf was reached.
    pub resolved: bool,
    /// Ids of the nodes whose predicate held or that were entered by
    /// delegation, in visiting order.
    pub path: Vec<String>,
}

/// Evaluate a tree against a record.
#[instrument(skip_all, fields(model = %tree.model_name, strategy = %tree.missing_value_strategy))]
pub fn evaluate(tree: &Tree, record: &Record) -> EvalResult<Prediction> {
    let mut evaluator = Evaluator::new(tree, record);
    evaluator.eval_node(&tree.node)?;
    Ok(evaluator.finish())
}

/// Running evaluation state (`t` in the generated code).
struct Evaluator<'a> {
    tree: &'a Tree,
    record: &'a Record,
    /// Last recorded score.
    last: Option<String>,
    resolved: bool,
    path: Vec<String>,
    /// Label → accumulated weight, in first-seen order.
    missing: Vec<(String, f64)>,
}

impl<'a> Evaluator<'a> {
    fn new(tree: &'a Tree, record: &'a Record) -> Self {
        Self {
            tree,
            record,
            last: None,
            resolved: false,
            path: Vec::new(),
            missing: Vec::new(),
        }
    }

    fn eval_node(&mut self, node: &Node) -> EvalResult<bool> {
        let predicate = node.predicate.as_ref().ok_or_else(|| {
            EvalError::MissingElement(format!("predicate of node '{}'", node.id))
        })?;
        let x = evaluate_predicate(predicate, self.record)?;
        trace!(id = %node.id, result = ?x, "node evaluated");

        match x {
            Truth::True => {
                self.path.push(node.id.clone());
                if let Some(score) = &node.score {
                    self.last = Some(score.clone());
                }
                if node.is_leaf() {
                    self.resolved = true;
                    return Ok(true);
                }
                let matched = self.next(node)?;
                if !matched && self.tree.no_true_child_strategy == NoTrueChildStrategy::ReturnNullPrediction {
                    self.last = None;
                }
                Ok(true)
            }
            Truth::Unknown => self.unresolved(node),
            Truth::False => Ok(false),
        }
    }

    /// Try children in order; the first that stops wins.
    fn next(&mut self, node: &Node) -> EvalResult<bool> {
        for child in &node.children {
            if self.eval_node(child)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn unresolved(&mut self, node: &Node) -> EvalResult<bool> {
        match self.tree.missing_value_strategy {
            MissingValueStrategy::None => Ok(false),
            MissingValueStrategy::LastPrediction => Ok(true),
            MissingValueStrategy::NullPrediction => {
                self.last = None;
                Ok(true)
            }
            MissingValueStrategy::DefaultChild => {
                let Some(id) = node.default_child.as_deref() else {
                    return Ok(false);
                };
                let child = node.child(id).ok_or_else(|| EvalError::UnknownChild {
                    node: node.id.clone(),
                    child: id.to_string(),
                })?;
                self.path.push(node.id.clone());
                self.eval_node(child)?;
                Ok(true)
            }
            MissingValueStrategy::WeightedConfidence => {
                for d in &node.distributions {
                    self.miss(&d.value, d.confidence);
                }
                Ok(false)
            }
            MissingValueStrategy::AggregateNodes => {
                for d in &node.distributions {
                    self.miss(&d.value, d.record_count as f64);
                }
                Ok(false)
            }
        }
    }

    fn miss(&mut self, label: &str, weight: f64) {
        match self.missing.iter_mut().find(|(l, _)| l == label) {
            Some((_, total)) => *total += weight,
            None => self.missing.push((label.to_string(), weight)),
        }
    }

    fn finish(self) -> Prediction {
        let score = if self.resolved {
            self.last
        } else {
            best(&self.missing).or(self.last)
        };
        Prediction {
            score,
            resolved: self.resolved,
            path: self.path,
        }
    }
}

/// Heaviest label; ties go to the first seen.
fn best(weights: &[(String, f64)]) -> Option<String> {
    let mut top: Option<&(String, f64)> = None;
    for entry in weights {
        if top.map_or(true, |t| entry.1 > t.1) {
            top = Some(entry);
        }
    }
    top.map(|(label, _)| label.clone())
}
