//! Tracking data model.
//!
//! `TrackingEvent` and `TrackingResult` serialize with snake_case keys;
//! the flight types use camelCase, matching the REST schema.

use serde::{Deserialize, Serialize};

/// One row of a shipment's history, most recent first as presented by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Date as printed by the portal
    pub date: String,
    /// Time as printed by the portal
    pub time: String,
    /// Handling office; empty in the list layout
    pub office: String,
    /// Event description, possibly empty
    pub event: String,
    /// Free-form location, which may name a flight
    pub location: Option<String>,
}

/// Outcome of one `track` call.
///
/// A result with `error` set never carries events; use [`TrackingResult::failure`]
/// to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResult {
    /// Normalized tracking number
    pub tracking_number: String,
    /// Derived status, or `"Error"` on failure
    pub status: String,
    /// History in page order
    pub events: Vec<TrackingEvent>,
    /// Origin office or country
    pub origin: Option<String>,
    /// Destination office or country
    pub destination: Option<String>,
    /// Booking date
    pub booked_on: Option<String>,
    /// Delivery date and time
    pub delivered_on: Option<String>,
    /// Article type, e.g. "Speed Post"
    pub article_type: Option<String>,
    /// Failure message; `None` on success
    pub error: Option<String>,
    /// Backend that produced the data, `"demo"`, or `"none"` after total failure
    pub source: Option<String>,
}

impl TrackingResult {
    /// Builds a failed result with an empty event history.
    pub fn failure(
        tracking_number: impl Into<String>,
        error: impl Into<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            status: "Error".to_string(),
            events: Vec::new(),
            origin: None,
            destination: None,
            booked_on: None,
            delivered_on: None,
            article_type: None,
            error: Some(error.into()),
            source,
        }
    }

    /// True when no error was recorded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Route and date metadata found outside the event history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentSummary {
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
}

/// Flight details parsed from an event location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInfo {
    /// Carrier code plus number, e.g. `AI0187`
    pub flight_number: Option<String>,
    /// Airline name preceding "flight"
    pub airline: Option<String>,
    /// Departure airport code
    pub origin: Option<String>,
    /// Arrival airport code
    pub destination: Option<String>,
}

/// Unique flights used by a shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    /// Whether any event mentions a flight
    pub has_flight_events: bool,
    /// Number of flight events, duplicates included
    pub flight_event_count: usize,
    /// Unique flights in first-seen order
    pub flights: Vec<FlightInfo>,
}
