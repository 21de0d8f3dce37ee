use serde::{Deserialize, Serialize};

use crate::{Array, Value};

/// A gating predicate.
///
/// Exactly one variant is populated. Operators are carried as the tag text
/// from the document; consumers map them onto their closed operator sets
/// and reject anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `field <operator> value`, or a presence test (`isMissing`, `isNotMissing`).
    #[serde(rename = "SimplePredicate")]
    Comparison(SimplePredicate),
    /// `and` / `or` / `xor` / `surrogate` over ordered children.
    #[serde(rename = "CompoundPredicate")]
    Compound(CompoundPredicate),
    /// `isIn` / `isNotIn` against an array literal.
    #[serde(rename = "SimpleSetPredicate")]
    SetMembership(SimpleSetPredicate),
    /// `True` or `False`.
    #[serde(rename = "Constant")]
    Constant(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePredicate {
    pub field: String,
    pub operator: String,
    /// Absent for the presence operators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundPredicate {
    #[serde(rename = "booleanOperator")]
    pub operator: String,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSetPredicate {
    pub field: String,
    #[serde(rename = "booleanOperator")]
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Array>,
}

impl Predicate {
    /// `field <operator> value`.
    pub fn simple(field: &str, operator: &str, value: impl Into<Value>) -> Self {
        Self::Comparison(SimplePredicate {
            field: field.to_string(),
            operator: operator.to_string(),
            value: Some(value.into()),
        })
    }

    /// A comparison without a value, as used by `isMissing` / `isNotMissing`.
    pub fn presence(field: &str, operator: &str) -> Self {
        Self::Comparison(SimplePredicate {
            field: field.to_string(),
            operator: operator.to_string(),
            value: None,
        })
    }

    pub fn compound(operator: &str, predicates: Vec<Predicate>) -> Self {
        Self::Compound(CompoundPredicate {
            operator: operator.to_string(),
            predicates,
        })
    }

    pub fn set(field: &str, operator: &str, array: Array) -> Self {
        Self::SetMembership(SimpleSetPredicate {
            field: field.to_string(),
            operator: operator.to_string(),
            array: Some(array),
        })
    }

    pub fn constant(value: bool) -> Self {
        Self::Constant(value)
    }
}
