//! Predicate evaluation with Lua semantics.
//!
//! A comparison `v.f and v.f <op> lit` is unknown when the field is absent,
//! false when the field holds `false`, and otherwise the comparison itself.
//! Equality between a number and a string is false, as in Lua; ordering
//! between them raises.

use std::cmp::Ordering;

use pmml_types::{ArrayValues, CompoundPredicate, Predicate, SimplePredicate, SimpleSetPredicate, Value};

use crate::error::{EvalError, EvalResult};
use crate::record::{lookup, Datum, Record};
use crate::truth::Truth;

/// Evaluate a predicate against a record.
pub fn evaluate_predicate(predicate: &Predicate, record: &Record) -> EvalResult<Truth> {
    match predicate {
        Predicate::Comparison(p) => comparison(p, record),
        Predicate::Compound(p) => compound(p, record),
        Predicate::SetMembership(p) => membership(p, record),
        Predicate::Constant(b) => Ok((*b).into()),
    }
}

fn comparison(p: &SimplePredicate, record: &Record) -> EvalResult<Truth> {
    let datum = lookup(record, &p.field);
    match p.operator.as_str() {
        "isMissing" => return Ok(datum.is_none().into()),
        "isNotMissing" => return Ok(datum.is_some().into()),
        "equal" | "notEqual" | "lessThan" | "lessOrEqual" | "greaterThan" | "greaterOrEqual" => {}
        other => return Err(EvalError::UnsupportedOperator(other.to_string())),
    }

    let value = p.value.as_ref().ok_or_else(|| {
        EvalError::MissingElement(format!("value of '{}' comparison on '{}'", p.operator, p.field))
    })?;

    let datum = match datum {
        None => return Ok(Truth::Unknown),
        Some(Datum::Flag(false)) => return Ok(Truth::False),
        Some(d) => d,
    };

    let result = match p.operator.as_str() {
        "equal" => equals(datum, value),
        "notEqual" => !equals(datum, value),
        op => {
            let ord = order(datum, value)?;
            match op {
                "lessThan" => ord == Ordering::Less,
                "lessOrEqual" => ord != Ordering::Greater,
                "greaterThan" => ord == Ordering::Greater,
                _ => ord != Ordering::Less,
            }
        }
    };
    Ok(result.into())
}

fn equals(datum: &Datum, value: &Value) -> bool {
    match (datum, value.as_number()) {
        (Datum::Number(n), Some(lit)) => *n == lit,
        (Datum::Text(s), None) => s == value.as_str(),
        _ => false,
    }
}

fn order(datum: &Datum, value: &Value) -> EvalResult<Ordering> {
    let ord = match (datum, value.as_number()) {
        (Datum::Number(n), Some(lit)) => n.partial_cmp(&lit),
        (Datum::Text(s), None) => Some(s.as_str().cmp(value.as_str())),
        _ => None,
    };
    ord.ok_or_else(|| EvalError::TypeMismatch(format!("cannot compare {datum} with {value}")))
}

fn compound(p: &CompoundPredicate, record: &Record) -> EvalResult<Truth> {
    let combine: fn(Vec<Truth>) -> Truth = match p.operator.as_str() {
        "and" => |v| Truth::and(v),
        "or" => |v| Truth::or(v),
        "xor" => |v| Truth::xor(v),
        "surrogate" => |v| Truth::surrogate(v),
        other => return Err(EvalError::UnsupportedOperator(other.to_string())),
    };
    // Children are values: every one is evaluated, as in the generated table.
    let values = p
        .predicates
        .iter()
        .map(|c| evaluate_predicate(c, record))
        .collect::<EvalResult<Vec<_>>>()?;
    Ok(combine(values))
}

fn membership(p: &SimpleSetPredicate, record: &Record) -> EvalResult<Truth> {
    let negated = match p.operator.as_str() {
        "isIn" => false,
        "isNotIn" => true,
        other => return Err(EvalError::UnsupportedOperator(other.to_string())),
    };
    let array = p.array.as_ref().ok_or_else(|| {
        EvalError::MissingElement(format!("array of '{}' predicate on '{}'", p.operator, p.field))
    })?;
    let values = array.parse()?;

    let Some(datum) = lookup(record, &p.field) else {
        return Ok(Truth::Unknown);
    };
    let found = match (&values, datum) {
        (ArrayValues::Ints(xs), Datum::Number(n)) => xs.iter().any(|x| *x as f64 == *n),
        (ArrayValues::Reals(xs), Datum::Number(n)) => xs.contains(n),
        (ArrayValues::Strings(xs), Datum::Text(s)) => xs.contains(s),
        _ => false,
    };
    let truth = Truth::from(found);
    Ok(if negated { truth.negate() } else { truth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;

    fn eval(p: &Predicate, r: &Record) -> Truth {
        evaluate_predicate(p, r).unwrap()
    }

    #[test]
    fn comparison_needs_presence() {
        let p = Predicate::simple("age", "greaterThan", "30");
        assert_eq!(eval(&p, &record([("age", 42)])), Truth::True);
        assert_eq!(eval(&p, &record([("age", 18)])), Truth::False);
        assert_eq!(eval(&p, &Record::new()), Truth::Unknown);
    }

    #[test]
    fn false_flag_short_circuits() {
        let p = Predicate::simple("member", "equal", "x");
        assert_eq!(eval(&p, &record([("member", false)])), Truth::False);
    }

    #[test]
    fn mixed_types() {
        let eq = Predicate::simple("name", "equal", "30");
        let ne = Predicate::simple("name", "notEqual", "30");
        let r = record([("name", "30")]);
        assert_eq!(eval(&eq, &r), Truth::False);
        assert_eq!(eval(&ne, &r), Truth::True);

        let lt = Predicate::simple("name", "lessThan", "30");
        assert!(matches!(evaluate_predicate(&lt, &r), Err(EvalError::TypeMismatch(_))));
    }

    #[test]
    fn string_ordering_is_bytewise() {
        let p = Predicate::simple("name", "lessThan", "Wenbo");
        assert_eq!(eval(&p, &record([("name", "Roman")])), Truth::True);
    }

    #[test]
    fn presence() {
        let r = record([("age", 1)]);
        assert_eq!(eval(&Predicate::presence("age", "isMissing"), &r), Truth::False);
        assert_eq!(eval(&Predicate::presence("x", "isMissing"), &r), Truth::True);
        assert_eq!(eval(&Predicate::presence("x", "isNotMissing"), &r), Truth::False);
    }

    #[test]
    fn unsupported_operator() {
        let p = Predicate::simple("name", "contains", "x");
        assert_eq!(
            evaluate_predicate(&p, &Record::new()),
            Err(EvalError::UnsupportedOperator("contains".into()))
        );
    }
}
