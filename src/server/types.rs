//! REST layer data structures.

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::{filter_flight_events, generate_flight_summary};
use crate::models::{FlightSummary, TrackingEvent, TrackingResult};
use crate::tracker::Tracker;

/// Shared state for the REST handlers
#[derive(Clone)]
pub struct AppState {
    /// Tracker shared by every request
    pub tracker: Tracker,
    /// Server start, for uptime reporting
    pub start_time: Arc<Instant>,
}

impl AppState {
    /// Wraps a tracker and records the start time.
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Current UTC time in RFC 3339 with microseconds.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// JSON response for `/` and `/health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// RFC 3339 UTC time of the response
    pub timestamp: String,
}

/// Query flags shared by the single-shipment endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    /// Tracking number, only read by `GET /track`
    pub id: Option<String>,
    /// Serve canned data instead of contacting the portal
    #[serde(default)]
    pub demo: bool,
    /// Return only flight events
    #[serde(default, rename = "flightOnly")]
    pub flight_only: bool,
}

/// JSON response for one tracked shipment
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackingResponse {
    /// True when no error was recorded
    pub success: bool,
    /// Normalized tracking number
    pub tracking_number: String,
    /// Derived status, or `"Error"`
    pub status: String,
    /// History, filtered to flight events when requested
    pub events: Vec<TrackingEvent>,
    /// Origin office or country
    pub origin: Option<String>,
    /// Destination office or country
    pub destination: Option<String>,
    /// Booking date
    pub booked_on: Option<String>,
    /// Delivery date and time
    pub delivered_on: Option<String>,
    /// Article type
    pub article_type: Option<String>,
    /// Failure message
    pub error: Option<String>,
    /// Backend name, `"demo"` or `"none"`
    pub source: Option<String>,
    /// Flights across the full history
    #[serde(rename = "flightSummary")]
    pub flight_summary: Option<FlightSummary>,
    /// RFC 3339 UTC time of the response
    pub timestamp: String,
}

impl TrackingResponse {
    /// Wraps a result. The flight summary always covers every event;
    /// `flight_only` filters the returned events only.
    pub fn from_result(result: TrackingResult, flight_only: bool) -> Self {
        let flight_summary = generate_flight_summary(&result.events);
        let events = if flight_only {
            filter_flight_events(&result.events)
        } else {
            result.events
        };

        Self {
            success: result.error.is_none(),
            tracking_number: result.tracking_number,
            status: result.status,
            events,
            origin: result.origin,
            destination: result.destination,
            booked_on: result.booked_on,
            delivered_on: result.delivered_on,
            article_type: result.article_type,
            error: result.error,
            source: result.source,
            flight_summary: Some(flight_summary),
            timestamp: timestamp(),
        }
    }
}

/// Request body for `POST /track/bulk`
#[derive(Debug, Deserialize, Serialize)]
pub struct BulkTrackingRequest {
    /// One to ten tracking numbers
    pub tracking_numbers: Vec<String>,
    /// Serve canned data instead of contacting the portal
    #[serde(default)]
    pub demo: bool,
    /// Return only flight events
    #[serde(default, rename = "flightOnly")]
    pub flight_only: bool,
}

/// JSON response for `POST /track/bulk`
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkTrackingResponse {
    /// True when every lookup succeeded
    pub success: bool,
    /// Per-number responses in request order
    pub results: Vec<TrackingResponse>,
    /// Number of lookups
    pub total: usize,
    /// Lookups without an error
    pub successful: usize,
    /// Lookups with an error
    pub failed: usize,
    /// RFC 3339 UTC time of the response
    pub timestamp: String,
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub successes: usize,
    pub demo: usize,
    pub errors: ErrorCounts,
}

#[derive(Debug, Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub by_type: std::collections::BTreeMap<&'static str, usize>,
}

/// Failure surfaced to API clients as `{success: false, error, timestamp}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (400)
    BadRequest(String),
    /// Unknown route (404)
    NotFound,
    /// Unexpected failure while serving the request (500)
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        let body = serde_json::json!({
            "success": false,
            "error": message,
            "timestamp": timestamp(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::demo_result;

    #[test]
    fn test_flight_only_keeps_full_summary() {
        let mut result = demo_result("LP951627598IN");
        result.events[2].location = Some("Flight - AI0187 (DEL to BOM)".to_string());
        result.events[3].location = Some("Flight - AI0187 (DEL to BOM)".to_string());

        let response = TrackingResponse::from_result(result, true);
        assert!(response.success);
        assert_eq!(response.events.len(), 2);
        let summary = response.flight_summary.expect("summary present");
        assert!(summary.has_flight_events);
        assert_eq!(summary.flight_event_count, 2);
        assert_eq!(summary.flights.len(), 1);
    }

    #[test]
    fn test_tracking_response_json_keys() {
        let response = TrackingResponse::from_result(demo_result("LP951627598IN"), false);
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json["success"], true);
        assert_eq!(json["tracking_number"], "LP951627598IN");
        assert_eq!(json["flightSummary"]["hasFlightEvents"], false);
        assert_eq!(json["events"].as_array().map(Vec::len), Some(5));
        assert!(json["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    }

    #[test]
    fn test_bulk_request_defaults() {
        let request: BulkTrackingRequest =
            serde_json::from_str(r#"{"tracking_numbers": ["LP951627598IN"]}"#).expect("valid");
        assert!(!request.demo);
        assert!(!request.flight_only);

        let request: BulkTrackingRequest = serde_json::from_str(
            r#"{"tracking_numbers": [], "demo": true, "flightOnly": true}"#,
        )
        .expect("valid");
        assert!(request.demo);
        assert!(request.flight_only);
    }
}
