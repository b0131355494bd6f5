//! The uniform result returned by every validation call

use crate::error::{ValidationErrors, ValidationResult};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Outcome of validating a record: all-or-nothing.
///
/// Serializes as `{ "success": true, "data": ... }` or
/// `{ "success": false, "error": [...] }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Success { data: Value },
    Failure { error: ValidationErrors },
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success { .. })
    }

    /// The validated record, on success
    pub fn data(&self) -> Option<&Value> {
        match self {
            ValidationOutcome::Success { data } => Some(data),
            ValidationOutcome::Failure { .. } => None,
        }
    }

    /// The violations, on failure
    pub fn error(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationOutcome::Success { .. } => None,
            ValidationOutcome::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> ValidationResult<Value> {
        match self {
            ValidationOutcome::Success { data } => Ok(data),
            ValidationOutcome::Failure { error } => Err(error),
        }
    }

    pub fn to_json(&self) -> Value {
        // Serializing plain JSON values and string fields cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<ValidationResult<Value>> for ValidationOutcome {
    fn from(result: ValidationResult<Value>) -> Self {
        match result {
            Ok(data) => ValidationOutcome::Success { data },
            Err(error) => ValidationOutcome::Failure { error },
        }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
        match self {
            ValidationOutcome::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ValidationOutcome::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
