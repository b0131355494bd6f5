//! `validate`: check an arbitrary JSON record against one of the form schemas

use super::Context;
use crate::forms::FormKind;
use anyhow::Context as _;
use std::io::Write;

/// Prints the full outcome as JSON and returns whether validation passed
pub fn validate(ctx: &Context, form: FormKind, data: &str, out: &mut dyn Write) -> anyhow::Result<bool> {
    let data: serde_json::Value =
        serde_json::from_str(data).context("--data is not valid JSON")?;

    let outcome = ctx.validator.validate(&data, &form.schema());
    writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;

    Ok(outcome.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::memory_context;
    use serde_json::json;

    fn run(form: FormKind, data: &str) -> anyhow::Result<(bool, serde_json::Value)> {
        let ctx = memory_context(false);
        let mut out = Vec::new();
        let ok = validate(&ctx, form, data, &mut out)?;
        Ok((ok, serde_json::from_slice(&out)?))
    }

    #[test]
    fn test_counter_over_limit() {
        let (ok, body) = run(FormKind::Counter, r#"{"count": 11}"#).unwrap();

        assert!(!ok);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"][0]["field"], json!("count"));
        assert_eq!(body["error"][0]["message"], json!("Count must be less than 10"));
    }

    #[test]
    fn test_success_echoes_data() {
        let (ok, body) = run(
            FormKind::Signup,
            r#"{"username": "carol", "email": "carol@example.com", "extra": 1}"#,
        )
        .unwrap();

        assert!(ok);
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": { "username": "carol", "email": "carol@example.com", "extra": 1 }
            })
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = run(FormKind::Counter, "{count: 1}").unwrap_err();
        assert!(err.to_string().contains("--data is not valid JSON"));
    }
}
