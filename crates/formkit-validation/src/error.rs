//! Validation error types and handling

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// A single violation reported against one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Additional context, e.g. the bound that was exceeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
            context: None,
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            context: None,
        }
    }

    /// Set the error code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set additional context
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of validation errors.
///
/// Serializes as a plain list of `{ field, message, code }` entries, in the
/// order the errors were recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Error, PartialEq)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a simple validation error with field and message
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.add(ValidationError::new(field, message));
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of distinct fields with errors
    pub fn len(&self) -> usize {
        self.fields().len()
    }

    /// Total number of errors across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }

    /// Names of the fields with errors, in first-seen order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(&error.field);
            }
        }
        fields
    }

    /// Errors recorded for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// The first message recorded for a field, which is what forms display
    pub fn first_message(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All errors in recording order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Rewrite every message, used for rule-level message overrides
    pub fn set_message(&mut self, message: &str) {
        for error in &mut self.errors {
            error.message = message.to_string();
        }
    }

    /// Rewrite the field name of every error
    pub fn set_field(&mut self, field: &str) {
        for error in &mut self.errors {
            error.field = field.to_string();
        }
    }

    /// Merge another ValidationErrors into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Create ValidationErrors from a single error
    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Convert to a JSON body suitable for printing or returning to a client
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.len())?;
            for error in &self.errors {
                write!(f, "\n  {}: {}", error.field, error.message)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
