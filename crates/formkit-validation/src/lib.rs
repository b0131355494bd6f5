//! # formkit-validation
//!
//! Declarative field validation for untyped records. A [`Schema`] maps field
//! names to [`FieldRule`] descriptors; [`ValidationService::validate`] checks a
//! JSON record against it and reports every violated field as data, never as a
//! panic or an `Err`.
//!
//! ```rust
//! use formkit_validation::{FieldRule, Schema, ValidationService};
//! use serde_json::json;
//!
//! let schema = Schema::new().field(
//!     "count",
//!     FieldRule::number().lt(10.0).message("Count must be less than 10"),
//! );
//!
//! let outcome = ValidationService::new().validate(&json!({ "count": 11 }), &schema);
//! assert!(!outcome.is_success());
//! assert_eq!(
//!     outcome.error().unwrap().first_message("count"),
//!     Some("Count must be less than 10")
//! );
//! ```

pub mod error;
pub mod outcome;
pub mod rules;
pub mod service;
pub mod traits;
pub mod validators;

pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use outcome::ValidationOutcome;
pub use rules::{FieldRule, FieldType, Schema};
pub use service::ValidationService;
pub use traits::ValidationRule;

pub use validators::{
    custom::CustomValidator,
    email::EmailValidator,
    length::LengthValidator,
    numeric::NumericValidator,
    pattern::PatternValidator,
    required::RequiredValidator,
    typed::TypeValidator,
};

/// Pseudo-field used when the record itself is not an object
pub const ROOT_FIELD: &str = "_root";
