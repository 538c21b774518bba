//! Command implementations.

pub mod config;
pub mod doctor;
pub mod helpers;
pub mod install;
pub mod statusline;
pub mod uninstall;
pub mod version;
