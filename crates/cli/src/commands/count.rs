//! `count`, `show` and `reset`

use super::Context;
use crate::counter::{Counter, Increment};
use serde_json::json;
use std::io::Write;

/// Try to bump the counter. Returns whether the increment was accepted.
pub fn count(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<bool> {
    let mut counter = Counter::load(&ctx.storage, ctx.validator)?;

    match counter.increment()? {
        Increment::Accepted(value) => {
            if ctx.json {
                writeln!(out, "{}", json!({ "success": true, "count": value }))?;
            } else {
                writeln!(out, "count is {}", value)?;
            }
            Ok(true)
        }
        Increment::Rejected(errors) => {
            if ctx.json {
                writeln!(
                    out,
                    "{}",
                    json!({ "success": false, "count": counter.value(), "error": errors })
                )?;
            } else {
                writeln!(out, "count is {}", counter.value())?;
                for field in errors.fields() {
                    if let Some(message) = errors.first_message(field) {
                        writeln!(out, "{}", message)?;
                    }
                }
            }
            Ok(false)
        }
    }
}

pub fn show(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<bool> {
    let counter = Counter::load(&ctx.storage, ctx.validator)?;

    if ctx.json {
        writeln!(out, "{}", json!({ "count": counter.value() }))?;
    } else {
        writeln!(out, "count is {}", counter.value())?;
    }
    Ok(true)
}

pub fn reset(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<bool> {
    let mut counter = Counter::load(&ctx.storage, ctx.validator)?;
    counter.reset()?;

    if ctx.json {
        writeln!(out, "{}", json!({ "count": 0 }))?;
    } else {
        writeln!(out, "count is 0")?;
    }
    Ok(true)
}
