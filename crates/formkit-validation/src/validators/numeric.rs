//! Numeric value validators

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{type_name, ValidationRule};
use serde_json::Value;

/// Validator for numeric bounds.
///
/// `min`/`max` are inclusive, `gt`/`lt` exclusive. The first violated bound
/// produces the error.
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Lower bound (exclusive)
    pub gt: Option<f64>,
    /// Upper bound (exclusive)
    pub lt: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    /// Create a new numeric validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum value constraint
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value constraint
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Require values strictly greater than `gt`
    pub fn gt(mut self, gt: f64) -> Self {
        self.gt = Some(gt);
        self
    }

    /// Require values strictly less than `lt`
    pub fn lt(mut self, lt: f64) -> Self {
        self.lt = Some(lt);
        self
    }

    /// Set value range (min and max, inclusive)
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Require integer values only (no decimals)
    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, field: &str, default: String, code: &str, bound: Option<f64>) -> ValidationResult<()> {
        let message = self.message.clone().unwrap_or(default);
        let mut error = ValidationError::with_code(field, message, code);
        if let Some(bound) = bound {
            error = error.context(serde_json::json!({ "bound": bound }));
        }
        Err(error.into())
    }
}

impl ValidationRule for NumericValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let num = match value.as_f64() {
            Some(n) => n,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("Expected number, received {}", type_name(value)),
                    "invalid_type",
                )
                .into());
            }
        };

        if !num.is_finite() {
            return self.fail(field, "Number must be finite".to_string(), "invalid_number", None);
        }

        if self.integer_only && num.fract() != 0.0 {
            return self.fail(
                field,
                "Expected integer, received float".to_string(),
                "not_integer",
                None,
            );
        }

        if let Some(min) = self.min {
            if num < min {
                return self.fail(
                    field,
                    format!("Number must be greater than or equal to {}", min),
                    "too_small",
                    Some(min),
                );
            }
        }

        if let Some(gt) = self.gt {
            if num <= gt {
                return self.fail(
                    field,
                    format!("Number must be greater than {}", gt),
                    "too_small",
                    Some(gt),
                );
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return self.fail(
                    field,
                    format!("Number must be less than or equal to {}", max),
                    "too_big",
                    Some(max),
                );
            }
        }

        if let Some(lt) = self.lt {
            if num >= lt {
                return self.fail(
                    field,
                    format!("Number must be less than {}", lt),
                    "too_big",
                    Some(lt),
                );
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        let bounds = [("min", self.min), ("max", self.max), ("gt", self.gt), ("lt", self.lt)];
        for (name, bound) in bounds {
            if let Some(bound) = bound {
                params.insert(name.to_string(), serde_json::json!(bound));
            }
        }
        if self.integer_only {
            params.insert("integer_only".to_string(), Value::Bool(true));
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
