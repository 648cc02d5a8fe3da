//! The per-field schema fragment and option truthiness.

use serde_json::Value;

/// One JSON-Schema-like fragment for one field. Ordered (serde_json is built
/// with `preserve_order`), built incrementally, never shared between fields.
pub type Schema = serde_json::Map<String, Value>;

/// Whether an option value counts as "set" for the optional pipeline steps.
///
/// `null`, `false`, `""`, `0`, `[]` and `{}` all behave as absent.
pub fn is_set(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(xs) => !xs.is_empty(),
        Value::Object(m) => !m.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values_count_as_absent() {
        for v in [json!(null), json!(false), json!(""), json!(0), json!([]), json!({})] {
            assert!(!is_set(&v), "{v} should be absent-equivalent");
        }
    }

    #[test]
    fn truthy_values_count_as_set() {
        for v in [json!(true), json!("x"), json!(1), json!(-0.5), json!(["a"]), json!({"a": 1})] {
            assert!(is_set(&v), "{v} should be set");
        }
    }
}
