//! Runtime type checks over JSON values.

use serde_json::Value;

/// The name of the value's JSON type.
pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `null`, `""`, `[]` and `{}` are empty. So are numbers and booleans,
/// which hold no entries.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}

pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Whether `text` reads as a finite number, e.g. `"42"`, `" -1.5 "`, `"1e3"`.
pub fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_types() {
        assert_eq!(type_of(&json!(null)), "null");
        assert_eq!(type_of(&json!(1.5)), "number");
        assert_eq!(type_of(&json!([1])), "array");
        assert_eq!(type_of(&json!({})), "object");
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(is_empty(&json!(0)));
        assert!(!is_empty(&json!("x")));
        assert!(!is_empty(&json!({ "a": 1 })));
    }

    #[test]
    fn numeric_strings() {
        assert!(is_numeric("42"));
        assert!(is_numeric(" -1.5 "));
        assert!(is_numeric("1e3"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12px"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
        assert!(is_plain_object(&json!({})));
        assert!(!is_plain_object(&json!([])));
    }
}
