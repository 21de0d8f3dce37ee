use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Predicate;

/// How evaluation proceeds when a node's predicate is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingValueStrategy {
    #[default]
    None,
    LastPrediction,
    NullPrediction,
    DefaultChild,
    WeightedConfidence,
    AggregateNodes,
}

impl MissingValueStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LastPrediction => "lastPrediction",
            Self::NullPrediction => "nullPrediction",
            Self::DefaultChild => "defaultChild",
            Self::WeightedConfidence => "weightedConfidence",
            Self::AggregateNodes => "aggregateNodes",
        }
    }
}

impl fmt::Display for MissingValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a matched node yields when none of its children match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoTrueChildStrategy {
    #[default]
    ReturnLastPrediction,
    ReturnNullPrediction,
}

/// One category of a node's score distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDistribution {
    pub value: String,
    pub record_count: u64,
    #[serde(default)]
    pub confidence: f64,
}

/// A decision-tree node. Children are tried in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_child: Option<String>,
    #[serde(default, rename = "scoreDistributions")]
    pub distributions: Vec<ScoreDistribution>,
    /// `None` only for malformed documents; compilers reject it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Predicate>,
    #[serde(default, rename = "nodes")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            id: id.into(),
            score: None,
            record_count: 0,
            default_child: None,
            distributions: Vec::new(),
            predicate: Some(predicate),
            children: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }

    pub fn with_record_count(mut self, count: u64) -> Self {
        self.record_count = count;
        self
    }

    pub fn with_default_child(mut self, id: impl Into<String>) -> Self {
        self.default_child = Some(id.into());
        self
    }

    pub fn with_distribution(mut self, value: &str, record_count: u64, confidence: f64) -> Self {
        self.distributions.push(ScoreDistribution {
            value: value.to_string(),
            record_count,
            confidence,
        });
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child with the given id.
    pub fn child(&self, id: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.id == id)
    }
}

/// A decision-tree model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub model_name: String,
    #[serde(default)]
    pub missing_value_strategy: MissingValueStrategy,
    #[serde(default)]
    pub no_true_child_strategy: NoTrueChildStrategy,
    pub node: Node,
}

impl Tree {
    pub fn new(model_name: impl Into<String>, node: Node) -> Self {
        Self {
            model_name: model_name.into(),
            missing_value_strategy: MissingValueStrategy::None,
            no_true_child_strategy: NoTrueChildStrategy::ReturnLastPrediction,
            node,
        }
    }

    pub fn with_missing_value_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_value_strategy = strategy;
        self
    }

    pub fn with_no_true_child_strategy(mut self, strategy: NoTrueChildStrategy) -> Self {
        self.no_true_child_strategy = strategy;
        self
    }
}
