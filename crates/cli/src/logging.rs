//! Structured logging setup

use crate::config::Environment;
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "formkit=debug")
    pub level: String,
    /// Emit one JSON object per event
    pub json_format: bool,
    /// Multi-line human-friendly output
    pub pretty_print: bool,
    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            include_location: false,
        }
    }

    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: true,
        }
    }

    /// Minimal output for test runs
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
        }
    }

    /// Preset for an environment, with its level replaced by `level`
    pub fn for_environment(environment: Environment, level: &str) -> Self {
        let preset = match environment {
            Environment::Development => Self::development(),
            Environment::Testing => Self::test(),
            Environment::Production => Self::production(),
        };
        preset.with_level(level)
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        if json_format {
            self.pretty_print = false;
        }
        self
    }

    /// Filter to install: `RUST_LOG` wins, otherwise the configured level
    pub fn env_filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = config.env_filter()?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                Layer::new()
                    .with_writer(io::stderr)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .json(),
            )
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                Layer::new()
                    .with_writer(io::stderr)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .pretty(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).with_target(false))
            .try_init()?;
    }

    tracing::debug!(
        level = %config.level,
        format = if config.json_format { "json" } else { "text" },
        "Logging initialized"
    );

    Ok(())
}
