//! Error handling and tracking statistics.
//!
//! This module provides:
//! - Error type definitions (`TrackError`, `InitializationError`)
//! - Categorization of HTTP client failures
//! - Thread-safe outcome counters
//!
//! Every `TrackError` is recoverable: the orchestrator folds it into
//! `TrackingResult::error` instead of returning it to the caller.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::classify_reqwest_error;
pub use stats::TrackingStats;
pub use types::{ErrorType, InitializationError, TrackError};
