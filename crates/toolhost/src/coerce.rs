//! Lossless coercion of argument values onto declared parameter types.

use serde_json::{Number, Value};

use crate::schema::ParamType;

/// JSON kind name of a value, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert `value` to `target` if that can be done without losing information.
///
/// Values already of the declared type are returned unchanged. Returns `None`
/// when no lossless conversion exists.
pub fn coerce_value(value: Value, target: ParamType) -> Option<Value> {
    match target {
        ParamType::String => match value {
            Value::String(_) => Some(value),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ParamType::Number => match value {
            Value::Number(_) => Some(value),
            Value::String(s) => parse_number(&s).map(Value::Number),
            _ => None,
        },
        ParamType::Integer => match value {
            Value::Number(n) => integral(&n).map(Value::Number),
            Value::String(s) => parse_number(&s)
                .and_then(|n| integral(&n))
                .map(Value::Number),
            _ => None,
        },
        ParamType::Boolean => match value {
            Value::Bool(_) => Some(value),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        ParamType::Object => match value {
            Value::Object(_) => Some(value),
            Value::String(s) => match serde_json::from_str::<Value>(&s) {
                Ok(parsed @ Value::Object(_)) => Some(parsed),
                _ => None,
            },
            _ => None,
        },
        ParamType::Array => match value {
            Value::Array(_) => Some(value),
            Value::String(s) => match serde_json::from_str::<Value>(&s) {
                Ok(parsed @ Value::Array(_)) => Some(parsed),
                _ => None,
            },
            _ => None,
        },
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(Number::from(u));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

// Exclusive upper bounds; `i64::MAX as f64` already rounds up to 2^63.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn integral(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n.clone());
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 {
        return None;
    }
    if (-TWO_POW_63..TWO_POW_63).contains(&f) {
        Some(Number::from(f as i64))
    } else if (TWO_POW_63..TWO_POW_64).contains(&f) {
        Some(Number::from(f as u64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matching_types_pass_through() {
        assert_eq!(coerce_value(json!("hi"), ParamType::String), Some(json!("hi")));
        assert_eq!(coerce_value(json!(1.5), ParamType::Number), Some(json!(1.5)));
        assert_eq!(coerce_value(json!(7), ParamType::Integer), Some(json!(7)));
        assert_eq!(coerce_value(json!(true), ParamType::Boolean), Some(json!(true)));
        assert_eq!(coerce_value(json!({"a": 1}), ParamType::Object), Some(json!({"a": 1})));
        assert_eq!(coerce_value(json!([1, 2]), ParamType::Array), Some(json!([1, 2])));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(coerce_value(json!("42"), ParamType::Number), Some(json!(42)));
        assert_eq!(coerce_value(json!(" 2.5 "), ParamType::Number), Some(json!(2.5)));
        assert_eq!(coerce_value(json!("-3"), ParamType::Integer), Some(json!(-3)));
        assert_eq!(coerce_value(json!("abc"), ParamType::Number), None);
        assert_eq!(coerce_value(json!(""), ParamType::Number), None);
        assert_eq!(coerce_value(json!("NaN"), ParamType::Number), None);
        assert_eq!(coerce_value(json!("1.5"), ParamType::Integer), None);
    }

    #[test]
    fn test_integer_from_whole_float() {
        assert_eq!(coerce_value(json!(3.0), ParamType::Integer), Some(json!(3)));
        assert_eq!(coerce_value(json!(3.25), ParamType::Integer), None);
    }

    #[test]
    fn test_integer_range_boundaries() {
        assert_eq!(
            coerce_value(json!(9223372036854775808.0), ParamType::Integer),
            Some(json!(9_223_372_036_854_775_808u64))
        );
        assert_eq!(
            coerce_value(json!("9223372036854775808.0"), ParamType::Integer),
            Some(json!(9_223_372_036_854_775_808u64))
        );
        assert_eq!(
            coerce_value(json!(-9223372036854775808.0), ParamType::Integer),
            Some(json!(i64::MIN))
        );
        assert_eq!(
            coerce_value(json!(18446744073709551616.0), ParamType::Integer),
            None
        );
        assert_eq!(coerce_value(json!(-1e19), ParamType::Integer), None);
        assert_eq!(
            coerce_value(json!(u64::MAX), ParamType::Integer),
            Some(json!(u64::MAX))
        );
    }

    #[test]
    fn test_scalars_to_string() {
        assert_eq!(coerce_value(json!(12), ParamType::String), Some(json!("12")));
        assert_eq!(coerce_value(json!(false), ParamType::String), Some(json!("false")));
        assert_eq!(coerce_value(json!([1]), ParamType::String), None);
        assert_eq!(coerce_value(json!(null), ParamType::String), None);
    }

    #[test]
    fn test_boolean_strings() {
        assert_eq!(coerce_value(json!("TRUE"), ParamType::Boolean), Some(json!(true)));
        assert_eq!(coerce_value(json!("false"), ParamType::Boolean), Some(json!(false)));
        assert_eq!(coerce_value(json!("yes"), ParamType::Boolean), None);
        assert_eq!(coerce_value(json!(1), ParamType::Boolean), None);
    }

    #[test]
    fn test_structured_strings() {
        assert_eq!(
            coerce_value(json!("{\"k\":\"v\"}"), ParamType::Object),
            Some(json!({"k": "v"}))
        );
        assert_eq!(coerce_value(json!("[1,2]"), ParamType::Array), Some(json!([1, 2])));
        assert_eq!(coerce_value(json!("[1,2]"), ParamType::Object), None);
        assert_eq!(coerce_value(json!("not json"), ParamType::Array), None);
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!({})), "object");
        assert_eq!(kind_of(&json!("x")), "string");
    }
}
