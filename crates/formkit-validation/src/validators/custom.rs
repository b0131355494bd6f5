//! Custom validation functions and closures

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{type_name, ValidationRule};
use serde_json::Value;
use std::sync::Arc;

/// Type alias for validation functions
pub type ValidationFn = Arc<dyn Fn(&Value, &str) -> ValidationResult<()> + Send + Sync>;

/// Custom validator that accepts user-defined validation functions
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    validator: ValidationFn,
    /// Custom error message
    pub message: Option<String>,
}

impl CustomValidator {
    /// Create a new custom validator from a function returning a full result
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&Value, &str) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Create a validator from a boolean predicate
    pub fn predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |value, field| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::with_code(field, "Invalid input", "custom").into())
            }
        })
    }

    /// Create a validator that checks if a string is one of the allowed values
    pub fn one_of(name: impl Into<String>, allowed_values: Vec<String>) -> Self {
        Self::new(name, move |value, field| match value.as_str() {
            Some(s) if allowed_values.iter().any(|allowed| allowed == s) => Ok(()),
            Some(s) => {
                let expected = allowed_values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(" | ");
                Err(ValidationError::with_code(
                    field,
                    format!("Invalid enum value. Expected {}, received '{}'", expected, s),
                    "not_one_of",
                )
                .into())
            }
            None => Err(ValidationError::with_code(
                field,
                format!("Expected string, received {}", type_name(value)),
                "invalid_type",
            )
            .into()),
        })
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        match ((self.validator)(value, field), &self.message) {
            (Err(mut errors), Some(custom_message)) => {
                errors.set_message(custom_message);
                Err(errors)
            }
            (result, _) => result,
        }
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "name": self.name,
            "message": self.message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate() {
        let validator = CustomValidator::predicate("even", |v| {
            v.as_i64().map(|n| n % 2 == 0).unwrap_or(false)
        });

        assert!(validator.validate(&json!(4), "count").is_ok());
        let errors = validator.validate(&json!(3), "count").unwrap_err();
        let error = errors.iter().next().unwrap();
        assert_eq!(error.message, "Invalid input");
        assert_eq!(error.code, "custom");
    }

    #[test]
    fn test_message_override() {
        let validator = CustomValidator::predicate("not_admin", |v| v != "admin")
            .message("That username is reserved");

        let errors = validator.validate(&json!("admin"), "username").unwrap_err();
        assert_eq!(errors.first_message("username"), Some("That username is reserved"));
    }

    #[test]
    fn test_one_of() {
        let validator = CustomValidator::one_of(
            "theme",
            vec!["light".to_string(), "dark".to_string()],
        );

        assert!(validator.validate(&json!("dark"), "theme").is_ok());
        let errors = validator.validate(&json!("blue"), "theme").unwrap_err();
        assert_eq!(
            errors.first_message("theme"),
            Some("Invalid enum value. Expected 'light' | 'dark', received 'blue'")
        );
        assert!(validator.validate(&json!(1), "theme").is_err());
    }

    #[test]
    fn test_full_result_function() {
        let validator = CustomValidator::new("password_strength", |value, field| {
            let ok = value.as_str().map(|s| s.chars().any(|c| c.is_ascii_digit())).unwrap_or(false);
            if ok {
                Ok(())
            } else {
                Err(ValidationError::with_code(field, "Password needs a digit", "weak_password").into())
            }
        });

        assert!(validator.validate(&json!("hunter2"), "password").is_ok());
        assert!(validator.validate(&json!("hunter"), "password").is_err());
        assert_eq!(validator.name(), "password_strength");
    }
}
