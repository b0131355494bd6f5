//! Structural type check applied before any other rule on a field

use crate::error::{ValidationError, ValidationResult};
use crate::rules::FieldType;
use crate::traits::{type_name, ValidationRule};
use serde_json::Value;

/// Validator that checks the JSON type of a value
#[derive(Debug, Clone)]
pub struct TypeValidator {
    /// Expected type
    pub expected: FieldType,
    /// Custom error message
    pub message: Option<String>,
}

impl TypeValidator {
    pub fn new(expected: FieldType) -> Self {
        Self {
            expected,
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn matches(&self, value: &Value) -> bool {
        match self.expected {
            FieldType::Any => true,
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Integer => value
                .as_f64()
                .is_some_and(|n| n.is_finite() && n.fract() == 0.0),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }
}

impl ValidationRule for TypeValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if self.matches(value) {
            return Ok(());
        }

        let received = match (self.expected, value.is_number()) {
            (FieldType::Integer, true) => "float",
            _ => type_name(value),
        };
        let message = self.message.clone().unwrap_or_else(|| {
            format!("Expected {}, received {}", self.expected.as_str(), received)
        });

        Err(ValidationError::with_code(field, message, "invalid_type")
            .context(serde_json::json!({
                "expected": self.expected.as_str(),
                "received": received,
            }))
            .into())
    }

    fn rule_name(&self) -> &'static str {
        "type"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "expected": self.expected.as_str() }))
    }
}
