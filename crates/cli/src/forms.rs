//! Schemas for the forms this application accepts

use clap::ValueEnum;
use formkit_validation::{FieldRule, Schema};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for the counter
pub const COUNT_LIMIT: i64 = 10;

/// `count` must be a number below [`COUNT_LIMIT`]
pub fn counter_schema() -> Schema {
    Schema::new().field(
        "count",
        FieldRule::number()
            .lt(COUNT_LIMIT as f64)
            .message(format!("Count must be less than {}", COUNT_LIMIT)),
    )
}

pub fn signup_schema() -> Schema {
    Schema::new()
        .field(
            "username",
            FieldRule::string()
                .min_length(3)
                .message("Username must be at least 3 characters"),
        )
        .field(
            "email",
            FieldRule::string().email().message("Invalid email address"),
        )
}

/// A validated sign-up submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
}

/// Forms selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    Counter,
    Signup,
}

impl FormKind {
    pub fn schema(&self) -> Schema {
        match self {
            FormKind::Counter => counter_schema(),
            FormKind::Signup => signup_schema(),
        }
    }
}
