use serde_json::Value;

/// Text rendering of a scalar attribute value.
///
/// `None` for null, arrays and objects: those can never match a search term
/// or a filter value.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Filter comparison between an attribute value and the user's input.
///
/// Numeric comparison when both operands parse as numbers (so `400` matches
/// `"400"` and `"400.0"`), exact string comparison otherwise.
pub fn loose_eq(value: &Value, filter_value: &str) -> bool {
    let Some(text) = value_text(value) else {
        return false;
    };
    if let (Ok(a), Ok(b)) = (text.parse::<f64>(), filter_value.parse::<f64>()) {
        return a == b;
    }
    text == filter_value
}

#[cfg(test)]
mod tests {
    use super::{loose_eq, value_text};
    use serde_json::json;

    #[test]
    fn scalar_values_have_text() {
        assert_eq!(value_text(&json!("12A")), Some("12A".to_string()));
        assert_eq!(value_text(&json!(450.5)), Some("450.5".to_string()));
        assert_eq!(value_text(&json!(true)), Some("true".to_string()));
        assert_eq!(value_text(&json!(null)), None);
        assert_eq!(value_text(&json!([1, 2])), None);
    }

    #[test]
    fn numeric_coercion_only_when_both_sides_parse() {
        assert!(loose_eq(&json!(400), "400"));
        assert!(loose_eq(&json!("400"), "400.0"));
        assert!(loose_eq(&json!(400.0), "400"));
        assert!(!loose_eq(&json!(400), "401"));

        // One side non-numeric: exact string comparison.
        assert!(loose_eq(&json!("12A"), "12A"));
        assert!(!loose_eq(&json!("12A"), "12"));
        assert!(!loose_eq(&json!(null), ""));
    }
}
