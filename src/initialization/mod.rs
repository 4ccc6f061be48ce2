//! Application initialization and resource setup.
//!
//! This module provides functions to initialize:
//! - Per-attempt HTTP clients with their own cookie jar
//! - The process-wide logger

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
