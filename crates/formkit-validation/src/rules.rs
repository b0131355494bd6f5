//! Field rule descriptors and schema composition

use crate::error::{ValidationError, ValidationErrors};
use crate::traits::ValidationRule;
use crate::validators::*;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Expected JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    /// A number with no fractional part
    Integer,
    Boolean,
    Array,
    Object,
    Any,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Any => "any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
struct Check {
    rule: Arc<dyn ValidationRule>,
    message: Option<String>,
}

/// Declarative constraint on one field: type, required-ness and an ordered
/// list of checks, each with an optional custom message.
///
/// ```rust
/// use formkit_validation::FieldRule;
///
/// let username = FieldRule::string()
///     .min_length(3)
///     .message("Username must be at least 3 characters");
/// let email = FieldRule::string().email().message("Invalid email address");
/// ```
#[derive(Clone)]
pub struct FieldRule {
    required: RequiredValidator,
    type_check: TypeValidator,
    optional: bool,
    checks: Vec<Check>,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("type", &self.type_check.expected)
            .field("optional", &self.optional)
            .field(
                "checks",
                &self.checks.iter().map(|c| c.rule.rule_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldRule {
    /// A required field of the given type with no further checks
    pub fn of(kind: FieldType) -> Self {
        Self {
            required: RequiredValidator::new(),
            type_check: TypeValidator::new(kind),
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(FieldType::String)
    }

    pub fn number() -> Self {
        Self::of(FieldType::Number)
    }

    /// A number restricted to whole values
    pub fn integer() -> Self {
        Self::of(FieldType::Integer)
    }

    pub fn boolean() -> Self {
        Self::of(FieldType::Boolean)
    }

    pub fn array() -> Self {
        Self::of(FieldType::Array)
    }

    pub fn object() -> Self {
        Self::of(FieldType::Object)
    }

    pub fn any() -> Self {
        Self::of(FieldType::Any)
    }

    /// Accept a missing or null value
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Message used when the field is missing
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required.message = Some(message.into());
        self
    }

    /// Message for the most recently added check, or for the type check when
    /// no check has been added yet
    pub fn message(mut self, message: impl Into<String>) -> Self {
        match self.checks.last_mut() {
            Some(check) => check.message = Some(message.into()),
            None => self.type_check.message = Some(message.into()),
        }
        self
    }

    /// Append an arbitrary rule
    pub fn check<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.checks.push(Check {
            rule: Arc::new(rule),
            message: None,
        });
        self
    }

    /// Minimum value (inclusive)
    pub fn min(self, min: f64) -> Self {
        self.check(NumericValidator::new().min(min))
    }

    /// Maximum value (inclusive)
    pub fn max(self, max: f64) -> Self {
        self.check(NumericValidator::new().max(max))
    }

    /// Lower bound (exclusive)
    pub fn gt(self, gt: f64) -> Self {
        self.check(NumericValidator::new().gt(gt))
    }

    /// Upper bound (exclusive)
    pub fn lt(self, lt: f64) -> Self {
        self.check(NumericValidator::new().lt(lt))
    }

    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    /// Whole numbers only
    pub fn int(self) -> Self {
        self.check(NumericValidator::new().integer_only(true))
    }

    /// Minimum length in characters (strings) or elements (arrays)
    pub fn min_length(self, min: usize) -> Self {
        self.check(LengthValidator::new().min(min))
    }

    /// Maximum length in characters (strings) or elements (arrays)
    pub fn max_length(self, max: usize) -> Self {
        self.check(LengthValidator::new().max(max))
    }

    /// Exact length in characters (strings) or elements (arrays)
    pub fn length(self, exact: usize) -> Self {
        self.check(LengthValidator::new().exact(exact))
    }

    /// Reject blank strings and empty collections
    pub fn nonempty(self) -> Self {
        self.check(
            RequiredValidator::with_message("Must not be empty").reject_empty(true),
        )
    }

    pub fn email(self) -> Self {
        self.check(EmailValidator::new())
    }

    /// The whole string must match `regex`
    pub fn regex(self, regex: Regex) -> Self {
        self.check(PatternValidator::from_regex(regex))
    }

    /// The value must be one of `values`
    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
        self.check(CustomValidator::one_of("one_of", allowed))
    }

    /// Arbitrary predicate; failures report "Invalid input" unless a message is set
    pub fn refine<F>(self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.check(CustomValidator::predicate(name, predicate))
    }

    pub fn field_type(&self) -> FieldType {
        self.type_check.expected
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Names of the checks in evaluation order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.rule.rule_name()).collect()
    }

    /// Validate one field value. `None` means the field is absent.
    ///
    /// Returns the first violation; later checks are skipped once one fails.
    pub fn validate(&self, field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
        let value = match value {
            Some(value) if !value.is_null() => value,
            _ if self.optional => return Ok(()),
            _ => return Err(first(self.required.validate(&Value::Null, field).err(), field)),
        };

        self.type_check
            .validate(value, field)
            .map_err(|errors| first(Some(errors), field))?;

        for check in &self.checks {
            if let Err(mut errors) = check.rule.validate(value, field) {
                if let Some(ref message) = check.message {
                    errors.set_message(message);
                }
                errors.set_field(field);
                return Err(first(Some(errors), field));
            }
        }

        Ok(())
    }
}

fn first(errors: Option<ValidationErrors>, field: &str) -> ValidationError {
    errors
        .and_then(|errors| errors.iter().next().cloned())
        .unwrap_or_else(|| ValidationError::new(field, "Invalid input"))
}

/// Ordered mapping from field name to [`FieldRule`]
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(String, FieldRule)>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule, replacing any earlier rule for the same field
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    /// Rule for a specific field
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, rule)| rule)
    }

    /// Field rules in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every declared field of `record`, collecting one error per
    /// violated field. Fields not declared in the schema are ignored.
    pub fn validate_record(&self, record: &serde_json::Map<String, Value>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (name, rule) in &self.fields {
            if let Err(error) = rule.validate(name, record.get(name)) {
                errors.add(error);
            }
        }
        errors
    }
}

impl<S: Into<String>> FromIterator<(S, FieldRule)> for Schema {
    fn from_iter<T: IntoIterator<Item = (S, FieldRule)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Schema::new(), |schema, (name, rule)| schema.field(name, rule))
    }
}
