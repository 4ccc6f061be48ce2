//! Configuration constants.
//!
//! This module defines the constants used throughout the tracker: remote
//! portal endpoints, postback protocol field names, timeouts, and limits.

use std::time::Duration;

// Remote portal
/// Display name of the default tracking backend.
pub const DEFAULT_BACKEND_NAME: &str = "MIS CEPT";
/// Landing page visited once per session to acquire cookies.
pub const DEFAULT_BASE_URL: &str = "https://mis.cept.gov.in/";
/// Page hosting the tracking form (GET) and receiving the postback (POST).
pub const DEFAULT_TRACKING_URL: &str = "https://mis.cept.gov.in/General/IPS_Track.aspx";

// Postback protocol
/// Primary hidden-state field. Its absence means the form state is stale.
pub const VIEWSTATE_FIELD: &str = "__VIEWSTATE";
/// Hidden field naming the control that raised a postback.
pub const EVENT_TARGET_FIELD: &str = "__EVENTTARGET";
/// Hidden field carrying the postback argument.
pub const EVENT_ARGUMENT_FIELD: &str = "__EVENTARGUMENT";

/// Hidden-state fields captured from the form page and echoed back verbatim.
pub const HIDDEN_STATE_FIELDS: &[&str] = &[
    VIEWSTATE_FIELD,
    "__VIEWSTATEGENERATOR",
    "__EVENTVALIDATION",
    EVENT_TARGET_FIELD,
    EVENT_ARGUMENT_FIELD,
    "__PREVIOUSPAGE",
];

/// Input name used when no text input on the form page can be identified.
pub const DEFAULT_INPUT_FIELD: &str = "ctl00$ContentPlaceHolder1$txtItemId";
/// Submit button name used when neither a button nor a postback handler is found.
pub const DEFAULT_SUBMIT_BUTTON: &str = "ctl00$ContentPlaceHolder1$btnTrack";
/// Value posted for the submit button.
pub const SUBMIT_BUTTON_VALUE: &str = "Track Article";

/// Id of the article summary table on the result page.
pub const ARTICLE_TABLE_ID: &str = "example";

// Timing
/// Per-request and per-attempt timeout in seconds.
///
/// The attempt timeout wraps the session GET plus the form GET/POST legs.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Pause after session bootstrap and before form submission.
pub const POLITENESS_DELAY: Duration = Duration::from_millis(500);

// Limits
/// Maximum tracking numbers accepted in one bulk request.
pub const MAX_BATCH_SIZE: usize = 10;

/// Default User-Agent string for requests to the portal.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Service identity
/// Name reported by the health endpoints.
pub const SERVICE_NAME: &str = "India Post Tracking API";
/// Default REST listen port.
pub const DEFAULT_PORT: u16 = 8000;

// Tracking number validation
/// Pattern a normalized tracking number must match (2 letters, 9 digits, 2 letters).
pub const TRACKING_NUMBER_PATTERN: &str = r"^[A-Z]{2}\d{9}[A-Z]{2}$";
