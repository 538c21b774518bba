//! Helpers shared by unit and integration tests.

pub mod log;

pub use log::init_test_logging;
