//! Process-wide tracing setup.
//!
//! Everything goes to stderr: stdout belongs to the statusline.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a filter directive, e.g. `ccstatus=debug`.
pub const LOG_ENV: &str = "CCSTATUS_LOG";

/// Pick the filter: explicit directive, else `debug` when verbose, else `warn`.
pub fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directive) = directive
        && let Ok(filter) = EnvFilter::try_new(directive)
    {
        return filter;
    }
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(directive: Option<&str>, verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(build_filter(directive, verbose))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(build_filter(None, false).to_string(), "warn");
        assert_eq!(build_filter(None, true).to_string(), "debug");
        assert_eq!(
            build_filter(Some("ccstatus=trace"), false).to_string(),
            "ccstatus=trace"
        );
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        assert_eq!(build_filter(Some("ccstatus=loudest"), true).to_string(), "debug");
    }
}
