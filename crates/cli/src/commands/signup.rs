//! `signup`: validate and submit the sign-up form

use super::Context;
use crate::forms::{signup_schema, SignupForm};
use serde_json::json;
use std::io::Write;

pub fn signup(ctx: &Context, username: &str, email: &str, out: &mut dyn Write) -> anyhow::Result<bool> {
    let data = json!({ "username": username, "email": email });

    match ctx.validator.parse::<SignupForm>(&data, &signup_schema()) {
        Ok(form) => {
            tracing::info!(username = %form.username, email = %form.email, "Form submitted");
            if ctx.json {
                writeln!(out, "{}", json!({ "success": true, "data": form }))?;
            } else {
                writeln!(out, "Submitted: {} <{}>", form.username, form.email)?;
            }
            Ok(true)
        }
        Err(errors) => {
            tracing::debug!(violations = errors.total_errors(), "Form rejected");
            if ctx.json {
                writeln!(out, "{}", json!({ "success": false, "error": errors }))?;
            } else {
                for field in errors.fields() {
                    if let Some(message) = errors.first_message(field) {
                        writeln!(out, "{}: {}", field, message)?;
                    }
                }
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::memory_context;

    fn run(ctx: &Context, username: &str, email: &str) -> (bool, String) {
        let mut out = Vec::new();
        let ok = signup(ctx, username, email, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_submission() {
        let ctx = memory_context(false);
        let (ok, output) = run(&ctx, "alice", "alice@example.com");

        assert!(ok);
        assert_eq!(output, "Submitted: alice <alice@example.com>\n");
    }

    #[test]
    fn test_invalid_submission_lists_first_message_per_field() {
        let ctx = memory_context(false);
        let (ok, output) = run(&ctx, "ab", "nope");

        assert!(!ok);
        assert_eq!(
            output,
            "username: Username must be at least 3 characters\nemail: Invalid email address\n"
        );
    }

    #[test]
    fn test_json_output() {
        let ctx = memory_context(true);
        let (_, output) = run(&ctx, "bob", "bob@example.org");

        let body: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "data": { "username": "bob", "email": "bob@example.org" } })
        );
    }

    #[test]
    fn test_submission_does_not_touch_storage() {
        let ctx = memory_context(false);
        run(&ctx, "alice", "alice@example.com");
        assert!(ctx.storage.is_empty().unwrap());
    }
}
