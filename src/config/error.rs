//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A `*_SECS` variable was not a whole number of seconds.
    #[error("invalid duration for {name}: '{value}' is not a whole number of seconds")]
    InvalidDuration { name: &'static str, value: String },

    /// Log format other than `text` / `json`.
    #[error("invalid log format '{value}': expected 'text' or 'json'")]
    InvalidLogFormat { value: String },

    /// A setting that must be non-empty was blank.
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },

    /// A base URL without an `http://` or `https://` scheme.
    #[error("{name} must start with http:// or https://, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}
