//! HTML parsing for the tracking portal.
//!
//! This module covers both sides of the postback exchange:
//! - Form discovery (tracking input, submit button, postback target)
//! - Hidden state capture and error notices
//! - Tracking history in list or table layout
//! - Shipment summary (route, dates, article type)
//!
//! All functions take a parsed `scraper::Html` and return owned data, so a
//! document never has to outlive the synchronous call that parsed it.

mod events;
mod fields;
mod page;
mod summary;

pub use events::parse_tracking_events;
pub use fields::{
    describe_text_inputs, find_input_field, find_postback_target, find_submit_control, InputRule,
    SubmitControl, SubmitRule, INPUT_RULES, SUBMIT_RULES,
};
pub use page::{extract_hidden_state, find_error_notice};
pub use summary::extract_shipment_summary;
