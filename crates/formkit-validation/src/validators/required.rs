//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator that ensures a field is present.
///
/// By default only `null` (which is also how a missing field is presented)
/// fails. With [`RequiredValidator::reject_empty`] blank strings, empty arrays
/// and empty objects fail as well.
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Treat blank strings and empty collections as missing
    pub reject_empty: bool,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            reject_empty: false,
        }
    }

    /// Also reject blank strings and empty collections
    pub fn reject_empty(mut self, reject_empty: bool) -> Self {
        self.reject_empty = reject_empty;
        self
    }

    fn is_missing(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) if self.reject_empty => s.trim().is_empty(),
            Value::Array(arr) if self.reject_empty => arr.is_empty(),
            Value::Object(obj) if self.reject_empty => obj.is_empty(),
            _ => false,
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if self.is_missing(value) {
            let message = self.message.clone().unwrap_or_else(|| "Required".to_string());
            Err(ValidationError::with_code(field, message, "required").into())
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "message": self.message,
            "reject_empty": self.reject_empty,
        }))
    }
}
