//! Lenient conversions for loosely typed JSON fields.

use serde_json::Value;

/// Coerce a JSON value to an `i32`.
///
/// Integers and numeric strings convert directly, floats are truncated.
/// Anything else (including a missing value) becomes 0.
pub(crate) fn to_i32(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i32::try_from(i).unwrap_or(0),
            None if n.is_f64() => n.as_f64().map(truncate_f64).unwrap_or(0),
            None => 0,
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_f64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Truncate toward zero; values outside the `i32` range (and NaN) become 0.
fn truncate_f64(f: f64) -> i32 {
    let t = f.trunc();
    if t >= f64::from(i32::MIN) && t <= f64::from(i32::MAX) {
        t as i32
    } else {
        0
    }
}

/// Read a JSON value as a string list.
///
/// Arrays keep their string, number and boolean entries in order; a bare
/// string is a single-entry list. Other values yield an empty list.
pub(crate) fn to_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Return the value as an owned string if it is a JSON string.
pub(crate) fn to_opt_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_coercion() {
        assert_eq!(to_i32(Some(&json!(1))), 1);
        assert_eq!(to_i32(Some(&json!(-1))), -1);
        assert_eq!(to_i32(Some(&json!(1.9))), 1);
        assert_eq!(to_i32(Some(&json!(" 2 "))), 2);
        assert_eq!(to_i32(Some(&json!("1.0"))), 1);
        assert_eq!(to_i32(Some(&json!("high"))), 0);
        assert_eq!(to_i32(Some(&json!(true))), 0);
        assert_eq!(to_i32(Some(&json!(null))), 0);
        assert_eq!(to_i32(Some(&json!(u64::MAX))), 0);
        assert_eq!(to_i32(Some(&json!(1e12))), 0);
        assert_eq!(to_i32(Some(&json!(-1e12))), 0);
        assert_eq!(to_i32(Some(&json!("1e12"))), 0);
        assert_eq!(to_i32(Some(&json!(-2.7))), -2);
        assert_eq!(to_i32(None), 0);
    }

    #[test]
    fn string_list_conversion() {
        assert_eq!(
            to_string_list(&json!(["Admin", 7, null, true])),
            vec!["Admin", "7", "true"]
        );
        assert_eq!(to_string_list(&json!("user")), vec!["user"]);
        assert!(to_string_list(&json!({"role": "user"})).is_empty());
        assert!(to_string_list(&json!([])).is_empty());
    }

    #[test]
    fn optional_strings() {
        assert_eq!(to_opt_string(Some(&json!("de"))), Some("de".to_string()));
        assert_eq!(to_opt_string(Some(&json!(49))), None);
        assert_eq!(to_opt_string(None), None);
    }
}
