//! Environment variable parsing.
//!
//! Variables use the `CCSTATUS_` prefix. Invalid values fall back to the
//! default and are collected so the caller can log them once.

use std::time::Duration;
use thiserror::Error;

/// Default usage endpoint.
pub const DEFAULT_USAGE_API_URL: &str = "https://api.anthropic.com/api/oauth/usage";
/// Timeout for the usage call made while rendering.
pub const DEFAULT_API_TIMEOUT: Duration = crate::usage::RENDER_TIMEOUT;

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    #[error("Value out of range for {var}: {value} (valid: {min}..={max})")]
    OutOfRange {
        var: String,
        value: String,
        min: String,
        max: String,
    },
}

/// Reads prefixed variables through a lookup function.
pub struct EnvParser<F> {
    prefix: &'static str,
    lookup: F,
    errors: Vec<EnvError>,
}

impl<F> EnvParser<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self {
            prefix: "CCSTATUS_",
            lookup,
            errors: Vec::new(),
        }
    }

    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Non-empty trimmed value, if set.
    pub fn get_optional(&mut self, name: &str) -> Option<String> {
        (self.lookup)(&self.var_name(name))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn get_string(&mut self, name: &str, default: &str) -> String {
        self.get_optional(name)
            .unwrap_or_else(|| default.to_string())
    }

    /// Get a u64 value with default and range validation.
    pub fn get_u64_range(&mut self, name: &str, default: u64, min: u64, max: u64) -> u64 {
        let var_name = self.var_name(name);
        let Some(value) = self.get_optional(name) else {
            return default;
        };
        match value.parse::<u64>() {
            Ok(n) if n >= min && n <= max => n,
            Ok(n) => {
                self.errors.push(EnvError::OutOfRange {
                    var: var_name,
                    value: n.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
                default
            }
            Err(_) => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name,
                    expected: "unsigned integer".to_string(),
                    value,
                });
                default
            }
        }
    }
}

/// Process-level settings that come from the environment rather than files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// `CCSTATUS_API_URL`
    pub usage_api_url: String,
    /// `CCSTATUS_API_TIMEOUT_SECS`
    pub api_timeout: Duration,
    /// `CCSTATUS_OAUTH_TOKEN`: bypasses every credential store when set.
    pub oauth_token: Option<String>,
    /// `CCSTATUS_LOG`: tracing filter directive.
    pub log_filter: Option<String>,
    /// Problems found while parsing; values already fell back to defaults.
    pub warnings: Vec<EnvError>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            usage_api_url: DEFAULT_USAGE_API_URL.to_string(),
            api_timeout: DEFAULT_API_TIMEOUT,
            oauth_token: None,
            log_filter: None,
            warnings: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut parser = EnvParser::new(lookup);
        let usage_api_url = parser.get_string("API_URL", DEFAULT_USAGE_API_URL);
        let api_timeout = Duration::from_secs(parser.get_u64_range(
            "API_TIMEOUT_SECS",
            DEFAULT_API_TIMEOUT.as_secs(),
            1,
            120,
        ));
        let oauth_token = parser.get_optional("OAUTH_TOKEN");
        let log_filter = parser.get_optional("LOG");

        Self {
            usage_api_url,
            api_timeout,
            oauth_token,
            log_filter,
            warnings: parser.take_errors(),
        }
    }
}
