//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (portal endpoints, protocol field names, timeouts)
//! - Library configuration and backend descriptions
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Backend, Command, Config, LogFormat, LogLevel, Opt};
