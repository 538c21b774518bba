//! Configuration for ccstatus.
//!
//! File-backed preferences live in [`crate::preferences`]; this module covers
//! the process environment.

pub mod env;

pub use env::{DEFAULT_API_TIMEOUT, DEFAULT_USAGE_API_URL, EnvError, EnvParser, RuntimeConfig};
