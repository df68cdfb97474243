use analysis_core::{number_to_integer, parse_integer, parse_number};
use serde_json::Value;

pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

pub(crate) fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(number_to_integer)),
        Value::String(s) => parse_integer(s),
        _ => None,
    }
}

/// Only an explicit `true` or `"true"` counts
pub(crate) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_from_text_or_json() {
        assert_eq!(number(Some(&json!("12.5"))), Some(12.5));
        assert_eq!(number(Some(&json!(12.5))), Some(12.5));
        assert_eq!(number(Some(&json!("None"))), None);
        assert_eq!(number(Some(&json!(null))), None);
        assert_eq!(number(None), None);
    }

    #[test]
    fn test_integer_from_text_or_json() {
        assert_eq!(integer(Some(&json!("300"))), Some(300));
        assert_eq!(integer(Some(&json!(300))), Some(300));
        assert_eq!(integer(Some(&json!(12.7))), Some(12));
        assert_eq!(integer(Some(&json!("-"))), None);
    }

    #[test]
    fn test_flag() {
        assert!(flag(Some(&json!("true"))));
        assert!(flag(Some(&json!(true))));
        assert!(!flag(Some(&json!("True"))));
        assert!(!flag(Some(&json!("false"))));
        assert!(!flag(None));
    }
}
