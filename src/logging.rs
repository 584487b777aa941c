//! Logging System
//!
//! Structured logging via the `tracing` crate. The core emits events;
//! this module wires up a subscriber with configurable level, format,
//! and destination for binaries and tests that want output.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr (default: stderr)
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// The `SIMFS_LOG` environment variable overrides the configured level
/// and accepts full filter directives. Calling this more than once is a
/// no-op; the first subscriber wins.
pub fn init_logging(config: Option<&LoggingConfig>) {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .ok();
        return;
    }

    let filter = build_env_filter(config);
    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    let to_stdout = config.map(|c| c.output == "stdout").unwrap_or(false);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        if to_stdout {
            base_subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stdout))
                .try_init()
                .ok();
        } else {
            base_subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .try_init()
                .ok();
        }
    } else if to_stdout {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(use_color)
                    .with_writer(std::io::stdout),
            )
            .try_init()
            .ok();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(use_color)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

/// Build environment filter from config or the SIMFS_LOG variable.
fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("SIMFS_LOG") {
        return filter;
    }
    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "text");
        assert_eq!(config.output, "stderr");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging(None);
        init_logging(Some(&LoggingConfig::default()));
    }
}
