//! Utility functions for HTML scraping.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - Text extraction and normalization helpers

mod selector;
mod text;

pub use selector::parse_selector_unsafe;
pub use text::{contains_any_ignore_case, element_text, visible_text};
