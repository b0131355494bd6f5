//! Pattern-based validators using regular expressions

use crate::error::{ValidationError, ValidationResult};
use crate::traits::{type_name, ValidationRule};
use regex::Regex;
use serde_json::Value;

/// Validator for custom regular expression patterns
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    /// `pattern` anchored at both ends, for full-match mode
    anchored: Option<Regex>,
    /// Custom error message
    pub message: Option<String>,
    /// Whether the match must span the entire string
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a new pattern validator
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Create a case-insensitive pattern validator
    pub fn new_case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(&format!("(?i){}", pattern))
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        let anchored = Regex::new(&format!("^(?:{})$", regex.as_str())).ok();
        Self {
            pattern: regex,
            anchored,
            message: None,
            full_match: true,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn matches(&self, text: &str) -> bool {
        if self.full_match {
            match &self.anchored {
                Some(anchored) => anchored.is_match(text),
                // Patterns that cannot be wrapped, e.g. ones ending in a verbose-mode comment
                None => self
                    .pattern
                    .find_iter(text)
                    .any(|m| m.start() == 0 && m.end() == text.len()),
            }
        } else {
            self.pattern.is_match(text)
        }
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let text = match value.as_str() {
            Some(text) => text,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("Expected string, received {}", type_name(value)),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.matches(text) {
            let message = self.message.clone().unwrap_or_else(|| "Invalid".to_string());
            return Err(ValidationError::with_code(field, message, "pattern_mismatch")
                .context(serde_json::json!({ "pattern": self.pattern.as_str() }))
                .into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "pattern": self.pattern.as_str(),
            "full_match": self.full_match,
            "message": self.message,
        }))
    }
}
