//! Input records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A field value, as the Lua runtime receives it.
///
/// JSON `null` becomes [`Datum::Nil`], which reads as a missing field:
/// Lua has no way to store `nil` in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Nil,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for Datum {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Datum {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

/// Field name → value. Absent fields are missing.
pub type Record = BTreeMap<String, Datum>;

/// The value of `field`, or `None` when it is absent or nil.
pub fn lookup<'a>(record: &'a Record, field: &str) -> Option<&'a Datum> {
    record.get(field).filter(|d| !matches!(d, Datum::Nil))
}

/// Build a record from pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<Datum>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_record() {
        let r: Record =
            serde_json::from_str(r#"{ "age": 42, "name": "Roman", "member": true }"#).unwrap();
        assert_eq!(r["age"], Datum::Number(42.0));
        assert_eq!(r["name"], Datum::Text("Roman".into()));
        assert_eq!(r["member"], Datum::Flag(true));
    }

    #[test]
    fn null_reads_as_absent() {
        let r: Record = serde_json::from_str(r#"{ "age": null, "name": "Roman" }"#).unwrap();
        assert_eq!(r["age"], Datum::Nil);
        assert_eq!(lookup(&r, "age"), None);
        assert_eq!(lookup(&r, "name"), Some(&Datum::Text("Roman".into())));
    }

    #[test]
    fn builds_from_pairs() {
        let r = record([("temperature", 60)]);
        assert_eq!(r.get("temperature"), Some(&Datum::Number(60.0)));
    }
}
