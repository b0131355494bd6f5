//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{type_name, ValidationRule};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const ASCII_EMAIL: &str = r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$";
const UNICODE_EMAIL: &str = r"^[^\s@.]+[^\s@]*@[^\s@.]+[^\s@]*\.[^\s@]+$";

/// Compiled email pattern, built on first use
fn email_regex(allow_unicode: bool) -> Option<&'static Regex> {
    static ASCII: OnceLock<Option<Regex>> = OnceLock::new();
    static UNICODE: OnceLock<Option<Regex>> = OnceLock::new();

    let (cell, pattern) = if allow_unicode {
        (&UNICODE, UNICODE_EMAIL)
    } else {
        (&ASCII, ASCII_EMAIL)
    };
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Validator for email address format
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Allow international domain names
    pub allow_unicode: bool,
}

impl EmailValidator {
    /// Create a new email validator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Allow unicode characters in the address
    pub fn allow_unicode(mut self, allow: bool) -> Self {
        self.allow_unicode = allow;
        self
    }

    fn is_valid(&self, email: &str) -> bool {
        let (local_part, domain_part) = match email.split_once('@') {
            Some(parts) => parts,
            None => return false,
        };

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return false;
        }

        // RFC 5321 limits
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }

        if email.contains("..") {
            return false;
        }

        email_regex(self.allow_unicode).is_some_and(|regex| regex.is_match(email))
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let email = match value.as_str() {
            Some(email) => email,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("Expected string, received {}", type_name(value)),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.is_valid(email) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| "Invalid email".to_string());

            return Err(ValidationError::with_code(field, message, "invalid_email").into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "message": self.message,
            "allow_unicode": self.allow_unicode,
        }))
    }
}
