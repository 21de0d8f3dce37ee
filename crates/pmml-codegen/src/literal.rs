//! Lua literal encoding for scalar values and array tables.

use pmml_types::{Array, ArrayValues, Value};

use crate::error::ErrorKind;

/// Render a scalar as a Lua literal.
///
/// Numeric text is emitted as written (minus a leading `+`, which Lua does
/// not accept); anything else is wrapped verbatim in single quotes.
pub fn encode_value(value: &Value) -> String {
    let raw = value.as_str();
    if value.as_number().is_some() {
        raw.strip_prefix('+').unwrap_or(raw).to_string()
    } else {
        format!("'{raw}'")
    }
}

/// Render text as a single-quoted Lua string.
///
/// Backslashes, quotes and control characters are escaped; control
/// characters without a short escape use the three-digit decimal form.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// The elements of an array rendered as a comma-separated Lua sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArray {
    pub items: String,
    pub len: usize,
}

impl EncodedArray {
    /// The array as a Lua table carrying its own length:
    /// `{1,2,3; n=3}`, or `{n=0}` when empty.
    pub fn table(&self) -> String {
        if self.len == 0 {
            "{n=0}".to_string()
        } else {
            format!("{{{}; n={}}}", self.items, self.len)
        }
    }
}

/// Parse an array under its element type and render its elements.
pub fn encode_array(array: &Array) -> Result<EncodedArray, ErrorKind> {
    let values = array.parse()?;
    let len = values.len();
    let items = match values {
        ArrayValues::Ints(ints) => join(ints.iter().map(i64::to_string)),
        ArrayValues::Reals(reals) => join(reals.iter().map(f64::to_string)),
        ArrayValues::Strings(strings) => {
            let quoted = strings
                .iter()
                .map(|s| serde_json::to_string(s).map_err(|e| ErrorKind::LiteralEncoding(e.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            quoted.join(",")
        }
    };
    Ok(EncodedArray { items, len })
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmml_types::ArrayType;

    #[test]
    fn numbers_are_emitted_verbatim() {
        assert_eq!(encode_value(&Value::from("30")), "30");
        assert_eq!(encode_value(&Value::from("0.08086312118570185")), "0.08086312118570185");
        assert_eq!(encode_value(&Value::from("1e-3")), "1e-3");
        assert_eq!(encode_value(&Value::from("+4")), "4");
    }

    #[test]
    fn everything_else_is_quoted() {
        assert_eq!(encode_value(&Value::from("Roman")), "'Roman'");
        assert_eq!(encode_value(&Value::from("")), "''");
        assert_eq!(encode_value(&Value::from("NaN")), "'NaN'");
        assert_eq!(encode_value(&Value::from("a b")), "'a b'");
    }

    #[test]
    fn quote_escapes_lua_string_syntax() {
        assert_eq!(quote("will play"), "'will play'");
        assert_eq!(quote("don't play"), r"'don\'t play'");
        assert_eq!(quote(r"C:\temp"), r"'C:\\temp'");
        assert_eq!(quote("two\nlines"), r"'two\nlines'");
        assert_eq!(quote("nul\0bell\x07"), r"'nul\000bell\007'");
        assert_eq!(quote("x'] or os.exit() or v['"), r"'x\'] or os.exit() or v[\''");
    }

    #[test]
    fn float_inputs_keep_fixed_precision() {
        assert_eq!(encode_value(&Value::from(0.25)), "0.250000000000000000000000");
    }

    #[test]
    fn int_array() {
        let arr = Array::new(ArrayType::Int, "1 22 3").with_length(3);
        let enc = encode_array(&arr).unwrap();
        assert_eq!(enc.items, "1,22,3");
        assert_eq!(enc.table(), "{1,22,3; n=3}");
    }

    #[test]
    fn real_array() {
        let arr = Array::new(ArrayType::Real, "1.5 22.1 3.95");
        assert_eq!(encode_array(&arr).unwrap().items, "1.5,22.1,3.95");
    }

    #[test]
    fn string_array_is_requoted() {
        let arr = Array::new(ArrayType::String, r#"ab  "a b"   "with \"quotes\" ""#);
        assert_eq!(
            encode_array(&arr).unwrap().items,
            r#""ab","a b","with \"quotes\" ""#
        );
    }

    #[test]
    fn empty_array_table() {
        let arr = Array::new(ArrayType::String, "");
        assert_eq!(encode_array(&arr).unwrap().table(), "{n=0}");
    }

    #[test]
    fn bad_element_fails() {
        let arr = Array::new(ArrayType::Int, "1 x");
        assert!(matches!(encode_array(&arr), Err(ErrorKind::LiteralEncoding(_))));
    }

    #[test]
    fn unknown_type_fails() {
        let arr = Array::new(ArrayType::Other("date".into()), "2020-01-01");
        assert_eq!(
            encode_array(&arr),
            Err(ErrorKind::UnsupportedElementType("date".into()))
        );
    }
}
