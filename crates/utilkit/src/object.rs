//! Object helpers over JSON values.

use serde_json::{Map, Value};

/// A new object holding only `keys` of `value`. Non-objects give `{}`.
pub fn pick(value: &Value, keys: &[&str]) -> Value {
    let mut out = Map::new();
    if let Value::Object(map) = value {
        for key in keys {
            if let Some(v) = map.get(*key) {
                out.insert((*key).to_string(), v.clone());
            }
        }
    }
    Value::Object(out)
}

/// A copy of `value` without `keys`. Non-objects give `{}`.
pub fn omit(value: &Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        _ => Value::Object(Map::new()),
    }
}

/// Look up a path such as `a.b[0].c` (or `a.b.0.c`).
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = path
        .split(['.', '['])
        .map(|s| s.trim_end_matches(']'))
        .filter(|s| !s.is_empty());

    let mut current = value;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Merge `source` into `target`, recursing into nested objects. Anything that
/// is not an object on both sides is replaced by the value from `source`.
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(a), Value::Object(b)) => {
            let mut merged = a.clone();
            for (key, value) in b {
                let next = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, source) => source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pick_and_omit() {
        let user = json!({ "name": "Ada", "age": 36, "admin": true });
        assert_eq!(pick(&user, &["name", "missing"]), json!({ "name": "Ada" }));
        assert_eq!(omit(&user, &["admin"]), json!({ "name": "Ada", "age": 36 }));
        assert_eq!(pick(&json!([1, 2]), &["0"]), json!({}));
    }

    #[test]
    fn paths() {
        let value = json!({ "a": { "b": [{ "c": 3 }] } });
        assert_eq!(get_path(&value, "a.b[0].c"), Some(&json!(3)));
        assert_eq!(get_path(&value, "a.b.0.c"), Some(&json!(3)));
        assert_eq!(get_path(&value, "a.x"), None);
        assert_eq!(get_path(&value, "a.b[5]"), None);
        assert_eq!(get_path(&value, ""), Some(&value));
    }

    #[test]
    fn merges_recursively() {
        let base = json!({ "a": { "x": 1, "y": 2 }, "list": [1, 2] });
        let patch = json!({ "a": { "y": 3, "z": 4 }, "list": [9] });
        assert_eq!(
            deep_merge(&base, &patch),
            json!({ "a": { "x": 1, "y": 3, "z": 4 }, "list": [9] })
        );
    }
}
