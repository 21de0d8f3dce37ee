use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ArrayError;

/// Element type tag of an [`Array`].
///
/// Unknown tags are retained as [`ArrayType::Other`] so that consumers can
/// report them instead of failing at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArrayType {
    Int,
    Real,
    String,
    Other(String),
}

impl ArrayType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Int => "int",
            Self::Real => "real",
            Self::String => "string",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ArrayType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "int" | "integer" => Self::Int,
            "real" => Self::Real,
            "string" => Self::String,
            _ => Self::Other(tag),
        }
    }
}

impl From<ArrayType> for String {
    fn from(ty: ArrayType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An array literal: element type, advisory length and raw payload.
///
/// The payload is a whitespace-separated token list. String elements that
/// contain whitespace are written as `"…"` with JSON escapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Array {
    #[serde(rename = "type")]
    pub array_type: ArrayType,
    /// Declared element count (`n`). Metadata only; never checked here.
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default)]
    pub values: String,
}

/// The typed elements of an [`Array`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    Ints(Vec<i64>),
    Reals(Vec<f64>),
    Strings(Vec<String>),
}

impl ArrayValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Ints(v) => v.len(),
            Self::Reals(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Array {
    pub fn new(array_type: ArrayType, values: impl Into<String>) -> Self {
        Self {
            array_type,
            length: None,
            values: values.into(),
        }
    }

    /// Attach a declared length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Split the payload into raw tokens. Quoted tokens keep their quotes.
    pub fn tokens(&self) -> Result<Vec<&str>, ArrayError> {
        let src = self.values.as_str();
        let bytes = src.as_bytes();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i].is_ascii_whitespace() {
                i += 1;
                continue;
            }

            let start = i;
            if bytes[i] == b'"' {
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => return Err(ArrayError::UnterminatedString(start)),
                        Some(b'\\') => i += 2,
                        Some(b'"') => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
            } else {
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
            }
            tokens.push(&src[start..i.min(bytes.len())]);
        }

        Ok(tokens)
    }

    pub fn ints(&self) -> Result<Vec<i64>, ArrayError> {
        self.tokens()?
            .into_iter()
            .map(|tok| tok.parse::<i64>().map_err(|_| invalid(tok, "int")))
            .collect()
    }

    pub fn reals(&self) -> Result<Vec<f64>, ArrayError> {
        self.tokens()?
            .into_iter()
            .map(|tok| {
                tok.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| invalid(tok, "real"))
            })
            .collect()
    }

    /// String elements, with quoted tokens unescaped once.
    pub fn strings(&self) -> Result<Vec<String>, ArrayError> {
        self.tokens()?
            .into_iter()
            .map(|tok| {
                if tok.len() >= 2 && tok.starts_with('"') && tok.ends_with('"') {
                    serde_json::from_str::<String>(tok).map_err(|_| invalid(tok, "string"))
                } else {
                    Ok(tok.to_string())
                }
            })
            .collect()
    }

    /// Parse the payload under the declared element type.
    pub fn parse(&self) -> Result<ArrayValues, ArrayError> {
        match &self.array_type {
            ArrayType::Int => self.ints().map(ArrayValues::Ints),
            ArrayType::Real => self.reals().map(ArrayValues::Reals),
            ArrayType::String => self.strings().map(ArrayValues::Strings),
            ArrayType::Other(tag) => Err(ArrayError::UnsupportedType(tag.clone())),
        }
    }
}

fn invalid(token: &str, expected: &'static str) -> ArrayError {
    ArrayError::InvalidElement {
        token: token.to_string(),
        expected,
    }
}
