//! Argument validation against a tool's input schema.

use serde_json::{Map, Value};

use crate::coerce::{coerce_value, kind_of};
use crate::schema::InputSchema;
use crate::tool::Arguments;
use crate::types::ValidationError;

/// Check `arguments` against `schema` and coerce declared values.
///
/// Required names are checked in declaration order and the first missing one
/// is reported; a `null` counts as missing. Optional properties sent as
/// `null` are dropped. Keys the schema does not declare pass through as-is.
pub fn validate_arguments(
    schema: &InputSchema,
    mut arguments: Map<String, Value>,
) -> Result<Arguments, ValidationError> {
    for name in &schema.required {
        match arguments.get(name) {
            None | Some(Value::Null) => return Err(ValidationError::Missing(name.clone())),
            Some(_) => {}
        }
    }

    for (name, property) in &schema.properties {
        let Some(value) = arguments.remove(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        let found = kind_of(&value);
        match coerce_value(value, property.param_type) {
            Some(coerced) => {
                arguments.insert(name.clone(), coerced);
            }
            None => {
                return Err(ValidationError::Type {
                    name: name.clone(),
                    expected: property.param_type,
                    found,
                })
            }
        }
    }

    Ok(Arguments::new(arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamDescriptor, ParamType};
    use serde_json::json;

    fn schema() -> InputSchema {
        InputSchema::generate(&[
            ParamDescriptor::new("text"),
            ParamDescriptor::new("count")
                .with_type(ParamType::Integer)
                .optional(),
            ParamDescriptor::new("ratio").with_type(ParamType::Number),
        ])
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_missing_required_reported() {
        let err = validate_arguments(&schema(), Map::new()).unwrap_err();
        assert_eq!(err, ValidationError::Missing("text".to_string()));
        assert!(err.to_string().contains("text"));

        let err = validate_arguments(&schema(), args(json!({ "text": "x" }))).unwrap_err();
        assert_eq!(err, ValidationError::Missing("ratio".to_string()));
    }

    #[test]
    fn test_null_required_is_missing() {
        let err =
            validate_arguments(&schema(), args(json!({ "text": null, "ratio": 1 }))).unwrap_err();
        assert_eq!(err, ValidationError::Missing("text".to_string()));
    }

    #[test]
    fn test_coercion_applied() {
        let out = validate_arguments(
            &schema(),
            args(json!({ "text": 5, "ratio": "0.5", "count": "3" })),
        )
        .unwrap();
        assert_eq!(out.str("text"), Some("5"));
        assert_eq!(out.f64("ratio"), Some(0.5));
        assert_eq!(out.i64("count"), Some(3));
    }

    #[test]
    fn test_uncoercible_value_rejected() {
        let err = validate_arguments(&schema(), args(json!({ "text": "x", "ratio": "lots" })))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Type {
                name: "ratio".to_string(),
                expected: ParamType::Number,
                found: "string",
            }
        );
    }

    #[test]
    fn test_optional_null_dropped_and_extras_kept() {
        let out = validate_arguments(
            &schema(),
            args(json!({ "text": "x", "ratio": 1, "count": null, "extra": [1] })),
        )
        .unwrap();
        assert!(!out.contains("count"));
        assert_eq!(out.get("extra"), Some(&json!([1])));
    }
}
