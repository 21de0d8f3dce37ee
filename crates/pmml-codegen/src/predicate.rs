//! Predicate compilation.
//!
//! Every predicate compiles to a single Lua expression that evaluates to
//! `true`, `false` or `nil` (unknown). Comparisons guard on presence so an
//! absent field yields `nil` rather than a runtime error; compound
//! predicates hand their children to the runtime combinators as values so
//! unknown propagation stays the runtime's job.

use std::str::FromStr;

use pmml_types::{CompoundPredicate, Predicate, SimplePredicate, SimpleSetPredicate};

use crate::error::ErrorKind;
use crate::literal::encode_array;
use crate::options::CodegenOptions;
use crate::runtime::RUNTIME_ALIAS;
use crate::scope::Statement;

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Operators of a simple predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    IsMissing,
    IsNotMissing,
}

impl ComparisonOp {
    /// The Lua operator token.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal | Self::IsMissing => "==",
            Self::NotEqual | Self::IsNotMissing => "~=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// Whether the operator only tests presence and takes no value.
    pub fn is_presence(self) -> bool {
        matches!(self, Self::IsMissing | Self::IsNotMissing)
    }
}

impl FromStr for ComparisonOp {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "equal" => Self::Equal,
            "notEqual" => Self::NotEqual,
            "lessThan" => Self::LessThan,
            "lessOrEqual" => Self::LessOrEqual,
            "greaterThan" => Self::GreaterThan,
            "greaterOrEqual" => Self::GreaterOrEqual,
            "isMissing" => Self::IsMissing,
            "isNotMissing" => Self::IsNotMissing,
            other => return Err(ErrorKind::UnsupportedOperator(other.to_string())),
        })
    }
}

/// Operators of a compound predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
    Xor,
    Surrogate,
}

impl BooleanOp {
    /// Name of the runtime combinator.
    pub fn combinator(self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
            Self::Xor => "Xor",
            Self::Surrogate => "Surrogate",
        }
    }
}

impl FromStr for BooleanOp {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "and" => Self::And,
            "or" => Self::Or,
            "xor" => Self::Xor,
            "surrogate" => Self::Surrogate,
            other => return Err(ErrorKind::UnsupportedOperator(other.to_string())),
        })
    }
}

/// Operators of a set predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    IsIn,
    IsNotIn,
}

impl SetOp {
    /// Name of the runtime set function.
    pub fn function(self) -> &'static str {
        match self {
            Self::IsIn => "IsIn",
            Self::IsNotIn => "IsNotIn",
        }
    }
}

impl FromStr for SetOp {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isIn" => Ok(Self::IsIn),
            "isNotIn" => Ok(Self::IsNotIn),
            other => Err(ErrorKind::UnsupportedOperator(other.to_string())),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Compilation
// ══════════════════════════════════════════════════════════════════════════════

/// Compile a predicate into a Lua expression.
///
/// Failures are carried inside the returned statement.
pub fn compile_predicate(predicate: &Predicate, options: &CodegenOptions) -> Statement {
    match predicate {
        Predicate::Comparison(p) => compile_comparison(p),
        Predicate::Compound(p) => compile_compound(p, options),
        Predicate::SetMembership(p) => compile_set(p, options),
        Predicate::Constant(b) => Statement::new().boolean(*b),
    }
}

fn compile_comparison(p: &SimplePredicate) -> Statement {
    let out = Statement::new().field(&p.field);
    let op = match p.operator.parse::<ComparisonOp>() {
        Ok(op) => op,
        Err(kind) => return out.fail(kind),
    };

    if op.is_presence() {
        return out.append(format!(" {} nil", op.symbol()));
    }

    let Some(value) = &p.value else {
        return out.fail(ErrorKind::MissingElement(format!(
            "value of '{}' comparison on '{}'",
            p.operator, p.field
        )));
    };

    out.append(" and ")
        .field(&p.field)
        .append(format!(" {} ", op.symbol()))
        .value(value)
}

fn compile_compound(p: &CompoundPredicate, options: &CodegenOptions) -> Statement {
    let op = match p.operator.parse::<BooleanOp>() {
        Ok(op) => op,
        Err(kind) => return Statement::new().fail(kind),
    };

    let mut out = Statement::new().append(format!("{RUNTIME_ALIAS}.{}({{", op.combinator()));
    if p.predicates.is_empty() {
        return out.append("n=0})");
    }
    for (i, child) in p.predicates.iter().enumerate() {
        if i > 0 {
            out = out.append(", ");
        }
        out = out.statement(compile_predicate(child, options));
    }
    out.append(format!("; n={}}})", p.predicates.len()))
}

fn compile_set(p: &SimpleSetPredicate, options: &CodegenOptions) -> Statement {
    let out = Statement::new();
    let op = match p.operator.parse::<SetOp>() {
        Ok(op) => op,
        Err(kind) => return out.field(&p.field).fail(kind),
    };

    let out = out
        .append(format!("{RUNTIME_ALIAS}.{}(", op.function()))
        .field(&p.field)
        .append(", ");

    let Some(array) = &p.array else {
        return out.fail(ErrorKind::MissingElement(format!(
            "array of '{}' predicate on '{}'",
            p.operator, p.field
        )));
    };

    let encoded = match encode_array(array) {
        Ok(encoded) => encoded,
        Err(kind) => return out.fail(kind),
    };

    if options.strict_array_length {
        if let Some(declared) = array.length {
            if declared != encoded.len {
                return out.fail(ErrorKind::ArrayLengthMismatch {
                    declared,
                    actual: encoded.len,
                });
            }
        }
    }

    out.append(encoded.table()).append(")")
}
