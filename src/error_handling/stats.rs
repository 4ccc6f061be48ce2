//! Tracking statistics.
//!
//! Thread-safe counters for tracking outcomes, shared between concurrent
//! attempts and read by the status endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe tracking statistics.
///
/// All error types are initialized to zero on creation, so the maps are never
/// mutated after construction and can be shared through an `Arc`.
pub struct TrackingStats {
    successes: AtomicUsize,
    demo: AtomicUsize,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl TrackingStats {
    /// Creates counters at zero, one per error type.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        TrackingStats {
            successes: AtomicUsize::new(0),
            demo: AtomicUsize::new(0),
            errors,
        }
    }

    /// Records a lookup that returned tracking data from a backend.
    pub fn increment_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup answered with canned demo data.
    pub fn increment_demo(&self) {
        self.demo.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                error
            );
        }
    }

    /// Lookups answered by a backend.
    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Lookups answered with demo data.
    pub fn demo(&self) -> usize {
        self.demo.load(Ordering::SeqCst)
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Error counts keyed by category name, in declaration order.
    pub fn error_counts(&self) -> Vec<(&'static str, usize)> {
        ErrorType::iter()
            .map(|error| (error.as_str(), self.get_error_count(error)))
            .collect()
    }
}

impl Default for TrackingStats {
    fn default() -> Self {
        Self::new()
    }
}
