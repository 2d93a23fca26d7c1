//! Loose value coercions for source fields.
//!
//! Source corpora are hand-assembled JSON: chapter numbers arrive as strings,
//! verse text arrives as numbers, fields go missing. These helpers coerce
//! whatever is there into a number or a string without ever failing.

use serde_json::Value;

/// Coerce a field to a number.
///
/// Strings are trimmed and parsed (empty means zero), booleans are 0/1, null
/// is zero. An empty array is zero and a one-element array is its element.
/// A missing field, an object, a longer array, or an unparsable string is NaN.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number(s),
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [single] => to_number(Some(single)),
            _ => f64::NAN,
        },
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Parse a trimmed numeric string; empty is zero, garbage is NaN.
pub fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Coerce a number to a 1-based ordinal (chapter or verse).
///
/// Anything that is not a positive integer maps to `0`, which the indexer
/// treats as unusable.
pub fn to_ordinal(n: f64) -> u32 {
    if n.is_finite() && n.fract() == 0.0 && n >= 1.0 && n <= f64::from(u32::MAX) {
        n as u32
    } else {
        0
    }
}

/// Coerce a field to its string form.
///
/// A missing field is `"undefined"` and null is `"null"`; arrays join their
/// items with commas and objects collapse to `"[object Object]"`.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => number_to_string(n.as_f64().unwrap_or(f64::NAN)),
        },
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Render a float the way a script runtime would print it.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Whether a field counts as present for "first of these aliases" lookups.
///
/// Missing, null, `false`, `0`, NaN and `""` do not.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// First truthy field among `keys`, if any.
pub fn first_truthy<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .map(|key| object.get(*key))
        .find(|value| is_truthy(*value))
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_from_loose_values() {
        assert_eq!(to_number(Some(&json!(3))), 3.0);
        assert_eq!(to_number(Some(&json!(" 12 "))), 12.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&json!(null))), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert!(to_number(Some(&json!("abc"))).is_nan());
        assert!(to_number(Some(&json!({"a": 1}))).is_nan());
        assert!(to_number(None).is_nan());
        assert_eq!(to_number(Some(&json!([]))), 0.0);
        assert_eq!(to_number(Some(&json!(["7"]))), 7.0);
        assert!(to_number(Some(&json!([1, 2]))).is_nan());
    }

    #[test]
    fn ordinals_reject_non_positive_integers() {
        assert_eq!(to_ordinal(1.0), 1);
        assert_eq!(to_ordinal(150.0), 150);
        assert_eq!(to_ordinal(0.0), 0);
        assert_eq!(to_ordinal(-3.0), 0);
        assert_eq!(to_ordinal(2.5), 0);
        assert_eq!(to_ordinal(f64::NAN), 0);
        assert_eq!(to_ordinal(f64::INFINITY), 0);
    }

    #[test]
    fn text_from_loose_values() {
        assert_eq!(to_text(Some(&json!("In the beginning"))), "In the beginning");
        assert_eq!(to_text(Some(&json!(42))), "42");
        assert_eq!(to_text(Some(&json!(1.5))), "1.5");
        assert_eq!(to_text(Some(&json!(null))), "null");
        assert_eq!(to_text(None), "undefined");
        assert_eq!(to_text(Some(&json!(["a", null, 3]))), "a,,3");
        assert_eq!(to_text(Some(&json!({"x": 1}))), "[object Object]");
    }

    #[test]
    fn truthiness() {
        let obj = json!({"chapter": 0, "number": "", "n": 7});
        assert!(!is_truthy(obj.get("chapter")));
        assert!(!is_truthy(obj.get("number")));
        assert!(!is_truthy(obj.get("missing")));
        assert_eq!(first_truthy(&obj, &["chapter", "number", "n"]), Some(&json!(7)));
        assert_eq!(first_truthy(&obj, &["chapter", "number"]), None);
    }
}
