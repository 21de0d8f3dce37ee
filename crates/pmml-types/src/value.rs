use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A scalar literal as written in the model document.
///
/// The text is kept raw. Whether it denotes a number or a string is decided
/// lazily by the consumer through [`Value::as_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Value(pub String);

impl Value {
    /// Create a value from raw document text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the raw text as a finite base-10 float.
    ///
    /// `inf`, `NaN` and overflowing literals are not numbers here: the Lua
    /// runtime has no literal syntax for them.
    pub fn as_number(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Value {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Float inputs are rendered with 24 fixed decimal places so the literal
/// reads back identically in any host language.
impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self(format!("{number:.24}"))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Documents may carry `"value": 30` as well as `"value": "30"`.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
            Flag(bool),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
            Raw::Flag(flag) => Self(flag.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_parses() {
        assert_eq!(Value::from("30").as_number(), Some(30.0));
        assert_eq!(Value::from("0.08086312118570185").as_number(), Some(0.08086312118570185));
        assert_eq!(Value::from("-1e3").as_number(), Some(-1000.0));
    }

    #[test]
    fn non_numeric_text_is_not_a_number() {
        assert_eq!(Value::from("Roman").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
    }

    #[test]
    fn float_input_uses_fixed_precision() {
        assert_eq!(Value::from(0.5).as_str(), "0.500000000000000000000000");
        assert_eq!(Value::from(30.0).as_str(), "30.000000000000000000000000");
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let v: Value = serde_json::from_str("30").unwrap();
        assert_eq!(v.as_str(), "30");
        let v: Value = serde_json::from_str("0.25").unwrap();
        assert_eq!(v.as_str(), "0.25");
        let v: Value = serde_json::from_str("\"sunny\"").unwrap();
        assert_eq!(v.as_str(), "sunny");
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v.as_str(), "true");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Value::from("30")).unwrap();
        assert_eq!(json, "\"30\"");
    }
}
