//! Test logging.
//!
//! Call [`init_test_logging`] at the top of a test to see `tracing` output
//! captured per test by the libtest harness. Safe to call repeatedly.
//!
//! `CCSTATUS_TEST_LOG_LEVEL` sets the level (default `info`).

use std::sync::Once;
use tracing_subscriber::prelude::*;

static TEST_LOGGING_INIT: Once = Once::new();

pub fn init_test_logging() {
    TEST_LOGGING_INIT.call_once(|| {
        let level =
            std::env::var("CCSTATUS_TEST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let filter = tracing_subscriber::EnvFilter::try_new(format!(
            "ccstatus={level},ccstatus_common={level}"
        ))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_level(true)
            .compact();

        let _ = tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(layer),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::info!(phase = "verify", "logging initialised");
    }
}
