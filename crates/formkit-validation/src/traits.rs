//! Core validation trait

use crate::error::ValidationResult;
use serde_json::Value;

/// A single check applied to one field value.
///
/// Implementations report failures through the returned `ValidationErrors`
/// and must not panic on unexpected input.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Human-readable name of a JSON value's type, as used in type mismatch messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
