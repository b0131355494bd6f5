//! The validation entry point

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::outcome::ValidationOutcome;
use crate::rules::Schema;
use crate::traits::type_name;
use crate::ROOT_FIELD;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Stateless validation service.
///
/// Constructed explicitly and handed to whoever needs it; holds no state, so
/// cloning or sharing it is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Check `data` against `schema`.
    ///
    /// Never fails: violations are returned as [`ValidationOutcome::Failure`],
    /// with one entry per violated field. On success the record is returned
    /// unchanged, including fields the schema does not mention.
    pub fn validate(&self, data: &Value, schema: &Schema) -> ValidationOutcome {
        let record = match data.as_object() {
            Some(record) => record,
            None => {
                let error = ValidationError::with_code(
                    ROOT_FIELD,
                    format!("Expected object, received {}", type_name(data)),
                    "invalid_type",
                );
                tracing::debug!(received = type_name(data), "Rejected non-object record");
                return ValidationOutcome::Failure {
                    error: error.into(),
                };
            }
        };

        let errors = schema.validate_record(record);
        if errors.is_empty() {
            tracing::debug!(fields = schema.len(), "Validation succeeded");
            ValidationOutcome::Success { data: data.clone() }
        } else {
            tracing::debug!(
                fields = schema.len(),
                violations = errors.total_errors(),
                "Validation failed"
            );
            ValidationOutcome::Failure { error: errors }
        }
    }

    /// Validate and then deserialize the record into `T`.
    ///
    /// Deserialization problems are reported as a `_root` violation with code
    /// `invalid_shape`.
    pub fn parse<T: DeserializeOwned>(&self, data: &Value, schema: &Schema) -> ValidationResult<T> {
        let data = self.validate(data, schema).into_result()?;
        serde_json::from_value(data).map_err(|e| {
            ValidationErrors::from_error(ValidationError::with_code(
                ROOT_FIELD,
                e.to_string(),
                "invalid_shape",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldRule;
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    fn count_schema() -> Schema {
        Schema::new().field(
            "count",
            FieldRule::number().lt(10.0).message("Count must be less than 10"),
        )
    }

    #[test]
    fn test_success_returns_data_unchanged() {
        let data = json!({ "count": 3, "ignored": "yes" });
        let outcome = ValidationService::new().validate(&data, &count_schema());

        assert_matches!(outcome, ValidationOutcome::Success { data: ref d } if *d == data);
    }

    #[test]
    fn test_failure_reports_message() {
        let outcome = ValidationService::new().validate(&json!({ "count": 11 }), &count_schema());

        let error = outcome.error().unwrap();
        assert_eq!(error.total_errors(), 1);
        assert_eq!(error.first_message("count"), Some("Count must be less than 10"));
    }

    #[test]
    fn test_empty_schema_accepts_any_object() {
        let service = ValidationService::new();
        assert!(service.validate(&json!({}), &Schema::new()).is_success());
        assert!(service.validate(&json!({ "a": 1 }), &Schema::new()).is_success());
    }

    #[test]
    fn test_non_object_record() {
        let outcome = ValidationService::new().validate(&json!([1, 2]), &Schema::new());

        let error = outcome.error().unwrap();
        assert_eq!(error.fields(), vec![ROOT_FIELD]);
        assert_eq!(error.first_message(ROOT_FIELD), Some("Expected object, received array"));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn test_parse_into_struct() {
        let service = ValidationService::new();

        let counter: Counter = service.parse(&json!({ "count": 4 }), &count_schema()).unwrap();
        assert_eq!(counter, Counter { count: 4 });

        let errors = service
            .parse::<Counter>(&json!({ "count": 12 }), &count_schema())
            .unwrap_err();
        assert!(errors.has_field_errors("count"));
    }

    #[test]
    fn test_parse_shape_error() {
        let errors = ValidationService::new()
            .parse::<Counter>(&json!({ "count": 2.5 }), &count_schema())
            .unwrap_err();

        assert_eq!(errors.iter().next().unwrap().code, "invalid_shape");
    }
}
