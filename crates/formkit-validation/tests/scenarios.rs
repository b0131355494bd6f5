use assert_matches::assert_matches;
use formkit_validation::{FieldRule, Schema, ValidationOutcome, ValidationService};
use serde_json::json;

fn counter_schema() -> Schema {
    Schema::new().field(
        "count",
        FieldRule::number().lt(10.0).message("Count must be less than 10"),
    )
}

fn signup_schema() -> Schema {
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

#[test]
fn count_over_limit_is_rejected() {
    let outcome = ValidationService::new().validate(&json!({ "count": 11 }), &counter_schema());

    assert_eq!(
        outcome.to_json(),
        json!({
            "success": false,
            "error": [{
                "field": "count",
                "message": "Count must be less than 10",
                "code": "too_big",
                "context": { "bound": 10.0 }
            }]
        })
    );
}

#[test]
fn count_boundary() {
    let service = ValidationService::new();

    assert!(service.validate(&json!({ "count": 9 }), &counter_schema()).is_success());
    assert!(!service.validate(&json!({ "count": 10 }), &counter_schema()).is_success());
}

#[test]
fn short_username_cites_min_length_message() {
    let schema = Schema::new().field(
        "username",
        FieldRule::string()
            .min_length(3)
            .message("Username must be at least 3 characters"),
    );

    let outcome = ValidationService::new().validate(&json!({ "username": "ab" }), &schema);

    let error = outcome.error().expect("should fail");
    assert_eq!(
        error.first_message("username"),
        Some("Username must be at least 3 characters")
    );
}

#[test]
fn signup_form_reports_one_entry_per_violated_field() {
    let outcome = ValidationService::new().validate(
        &json!({ "username": "", "email": "not-an-email" }),
        &signup_schema(),
    );

    let error = outcome.error().expect("should fail");
    assert_eq!(error.fields(), vec!["username", "email"]);
    assert_eq!(error.total_errors(), 2);
    assert_eq!(error.first_message("email"), Some("Invalid email address"));
}

#[test]
fn signup_form_missing_fields_are_required() {
    let outcome = ValidationService::new().validate(&json!({}), &signup_schema());

    let error = outcome.error().expect("should fail");
    assert_eq!(error.first_message("username"), Some("Required"));
    assert_eq!(error.first_message("email"), Some("Required"));
}

#[test]
fn conforming_data_is_returned_unchanged() {
    let data = json!({
        "username": "alice",
        "email": "alice@example.com",
        "remember_me": true
    });

    let outcome = ValidationService::new().validate(&data, &signup_schema());

    assert_matches!(outcome, ValidationOutcome::Success { data: ref returned } if *returned == data);
}
