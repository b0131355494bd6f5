//! Length-based validators for strings and collections

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator for string/array length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set exact length requirement
    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Length of a string (in chars) or array, with the noun used in messages
    fn measure(value: &Value) -> Option<(usize, &'static str, &'static str)> {
        match value {
            Value::String(s) => Some((s.chars().count(), "String", "character(s)")),
            Value::Array(arr) => Some((arr.len(), "Array", "element(s)")),
            _ => None,
        }
    }

    fn fail(&self, field: &str, default: String, code: &str, actual: usize) -> ValidationResult<()> {
        let message = self.message.clone().unwrap_or(default);
        Err(ValidationError::with_code(field, message, code)
            .context(serde_json::json!({ "length": actual }))
            .into())
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        // Null is the required check's concern
        if value.is_null() {
            return Ok(());
        }

        let (length, kind, unit) = match Self::measure(value) {
            Some(measured) => measured,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    "Expected string or array for length validation",
                    "invalid_type",
                )
                .into());
            }
        };

        if let Some(exact) = self.exact {
            if length != exact {
                return self.fail(
                    field,
                    format!("{} must contain exactly {} {}", kind, exact, unit),
                    "length_exact",
                    length,
                );
            }
            return Ok(());
        }

        if let Some(min) = self.min {
            if length < min {
                return self.fail(
                    field,
                    format!("{} must contain at least {} {}", kind, min, unit),
                    "length_min",
                    length,
                );
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return self.fail(
                    field,
                    format!("{} must contain at most {} {}", kind, max, unit),
                    "length_max",
                    length,
                );
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}
