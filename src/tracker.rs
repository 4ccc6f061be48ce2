//! Tracking orchestration.
//!
//! `Tracker` validates the tracking number, serves demo data when asked, and
//! otherwise tries each configured backend in order. Every attempt gets its
//! own [`SessionDriver`] and runs under the attempt timeout. Errors never
//! escape: they are folded into `TrackingResult::error`.

use std::sync::{Arc, LazyLock};

use futures::stream::{self, StreamExt};
use log::{error, info, warn};
use regex::Regex;
use scraper::Html;

use crate::config::{Backend, Config, MAX_BATCH_SIZE, TRACKING_NUMBER_PATTERN};
use crate::error_handling::{TrackError, TrackingStats};
use crate::models::{TrackingEvent, TrackingResult};
use crate::parse::{extract_shipment_summary, parse_tracking_events};
use crate::session::SessionDriver;
use crate::status::determine_status;

static TRACKING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRACKING_NUMBER_PATTERN).expect("tracking number regex"));

/// Source recorded on canned results.
pub const DEMO_SOURCE: &str = "demo";

/// Source recorded when every backend failed.
pub const NO_SOURCE: &str = "none";

/// Entry point for tracking lookups. Cheap to clone.
#[derive(Clone)]
pub struct Tracker {
    config: Arc<Config>,
    stats: Arc<TrackingStats>,
}

impl Tracker {
    /// Creates a tracker with fresh statistics.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            stats: Arc::new(TrackingStats::new()),
        }
    }

    /// The tracker's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Outcome counters shared by every clone of this tracker.
    pub fn stats(&self) -> &TrackingStats {
        &self.stats
    }

    /// Tracks one shipment.
    ///
    /// Invalid numbers fail without touching the network. In demo mode a canned
    /// result is returned. Otherwise backends are tried in order and the first
    /// success wins; if all fail the last error is reported with source `"none"`.
    pub async fn track(&self, tracking_number: &str, demo: bool) -> TrackingResult {
        let tracking_number = match validate_tracking_number(tracking_number) {
            Ok(number) => number,
            Err(e) => {
                self.stats.increment_error(e.error_type());
                let rejected = match &e {
                    TrackError::Validation { tracking_number } => tracking_number.clone(),
                    _ => tracking_number.to_string(),
                };
                return TrackingResult::failure(rejected, e.to_string(), None);
            }
        };

        if demo {
            self.stats.increment_demo();
            return demo_result(&tracking_number);
        }

        let mut last_error = None;
        for backend in &self.config.backends {
            match self.attempt(backend, &tracking_number).await {
                Ok(result) => {
                    info!(
                        "Tracked {} via {} ({} events, status: {})",
                        tracking_number,
                        backend.name,
                        result.events.len(),
                        result.status
                    );
                    self.stats.increment_success();
                    return result;
                }
                Err(e) => {
                    warn!("{} failed for {}: {}", backend.name, tracking_number, e);
                    self.stats.increment_error(e.error_type());
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "No tracking backends configured.".to_string());
        TrackingResult::failure(
            tracking_number,
            format!(
                "Could not retrieve tracking information. The India Post tracking website may \
                 require CAPTCHA or be temporarily unavailable. Last error: {}",
                detail
            ),
            Some(NO_SOURCE.to_string()),
        )
    }

    /// Tracks several shipments concurrently, one task per number.
    ///
    /// At most [`MAX_BATCH_SIZE`] lookups are in flight at once. Results come
    /// back in input order. A panicking task yields a failure result for its
    /// own number only.
    pub async fn track_batch(
        &self,
        tracking_numbers: Vec<String>,
        demo: bool,
    ) -> Vec<TrackingResult> {
        let outcomes: Vec<_> = stream::iter(tracking_numbers.clone())
            .map(|number| {
                let tracker = self.clone();
                tokio::spawn(async move { tracker.track(&number, demo).await })
            })
            .buffered(MAX_BATCH_SIZE)
            .collect()
            .await;

        tracking_numbers
            .into_iter()
            .zip(outcomes)
            .map(|(number, outcome)| {
                outcome.unwrap_or_else(|join_error| {
                    error!("Tracking task for {} failed: {:?}", number, join_error);
                    TrackingResult::failure(
                        number,
                        format!("Tracking task failed: {}", join_error),
                        None,
                    )
                })
            })
            .collect()
    }

    async fn attempt(
        &self,
        backend: &Backend,
        tracking_number: &str,
    ) -> Result<TrackingResult, TrackError> {
        let mut driver =
            SessionDriver::new(&self.config, backend.clone()).map_err(|e| TrackError::Session {
                backend: backend.name.clone(),
                message: e.to_string(),
            })?;

        let body = tokio::time::timeout(
            self.config.attempt_timeout(),
            driver.fetch_result_page(tracking_number),
        )
        .await
        .map_err(|_| TrackError::Timeout {
            backend: backend.name.clone(),
        })??;

        Ok(build_result(tracking_number, &backend.name, &body))
    }
}

/// Normalizes (trim, upper-case) and validates a tracking number.
///
/// # Errors
///
/// Returns `TrackError::Validation` unless the normalized number has the
/// form `XX123456789XX`.
pub fn validate_tracking_number(raw: &str) -> Result<String, TrackError> {
    let normalized = raw.trim().to_uppercase();
    if TRACKING_NUMBER_RE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(TrackError::Validation {
            tracking_number: normalized,
        })
    }
}

/// Canned result used in demo mode. Identical on every call.
pub fn demo_result(tracking_number: &str) -> TrackingResult {
    let event = |date: &str, time: &str, office: &str, text: &str, location: &str| TrackingEvent {
        date: date.to_string(),
        time: time.to_string(),
        office: office.to_string(),
        event: text.to_string(),
        location: Some(location.to_string()),
    };

    let events = vec![
        event("17-Jan-2025", "10:30", "MUMBAI GPO", "Item Delivered", "Mumbai"),
        event("16-Jan-2025", "08:15", "MUMBAI GPO", "Out for Delivery", "Mumbai"),
        event("15-Jan-2025", "14:20", "MUMBAI NSH", "Item Received", "Mumbai"),
        event("14-Jan-2025", "09:00", "DELHI NSH", "Item Dispatched", "Delhi"),
        event("13-Jan-2025", "16:45", "DELHI GPO", "Item Booked", "Delhi"),
    ];

    TrackingResult {
        tracking_number: tracking_number.to_string(),
        status: "Delivered".to_string(),
        events,
        origin: Some("Delhi".to_string()),
        destination: Some("Mumbai".to_string()),
        booked_on: Some("13-Jan-2025".to_string()),
        delivered_on: Some("17-Jan-2025".to_string()),
        article_type: Some("Speed Post".to_string()),
        error: None,
        source: Some(DEMO_SOURCE.to_string()),
    }
}

fn build_result(tracking_number: &str, source: &str, html: &str) -> TrackingResult {
    let document = Html::parse_document(html);
    let events = parse_tracking_events(&document);
    let summary = extract_shipment_summary(&document);

    TrackingResult {
        tracking_number: tracking_number.to_string(),
        status: determine_status(&events),
        events,
        origin: summary.origin,
        destination: summary.destination,
        booked_on: summary.booked_on,
        delivered_on: summary.delivered_on,
        article_type: summary.article_type,
        error: None,
        source: Some(source.to_string()),
    }
}
