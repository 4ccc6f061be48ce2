//! Flight detection and summary generation for tracking events.
//!
//! A flight event is one whose location mentions "flight", e.g.
//! `Flight - AI0187 (DEL to YYZ)`. Details are pulled from the location with
//! independent regexes, so a partial match still yields a `FlightInfo`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{FlightInfo, FlightSummary, TrackingEvent};

static FLIGHT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,3}\d{1,4})\b").expect("flight number regex"));

static AIRLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z\s]+?)(?:\s+flight|\s+FL)").expect("airline regex")
});

static FROM_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)from\s+([A-Za-z\s]+?)\s+to\s+([A-Za-z\s]+)").expect("from/to regex")
});

static CODE_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]{3})\s*[-–—]\s*([A-Za-z]{3})").expect("code pair regex"));

// "(DEL to YYZ)": upper-case airport codes joined by "to"
static CODE_TO_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{3})\s+to\s+([A-Z]{3})\b").expect("code route regex"));

/// Returns true if the event's location mentions a flight.
pub fn is_flight_event(event: &TrackingEvent) -> bool {
    event
        .location
        .as_deref()
        .is_some_and(|location| location.to_lowercase().contains("flight"))
}

/// Keeps only flight events, preserving order.
pub fn filter_flight_events(events: &[TrackingEvent]) -> Vec<TrackingEvent> {
    events
        .iter()
        .filter(|event| is_flight_event(event))
        .cloned()
        .collect()
}

/// Parses flight number, airline and route out of a location string.
///
/// Returns `None` only for an empty location; fields that cannot be found are
/// left empty.
pub fn extract_flight_info(location: &str) -> Option<FlightInfo> {
    if location.is_empty() {
        return None;
    }

    let flight_number = FLIGHT_NUMBER_RE
        .captures(&location.to_uppercase())
        .map(|caps| caps[1].to_string());

    let airline = AIRLINE_RE
        .captures(location)
        .map(|caps| caps[1].trim().to_string());

    let (origin, destination) = match extract_route(location) {
        Some((origin, destination)) => (Some(origin), Some(destination)),
        None => (None, None),
    };

    Some(FlightInfo {
        flight_number,
        airline,
        origin,
        destination,
    })
}

fn extract_route(location: &str) -> Option<(String, String)> {
    [&*FROM_TO_RE, &*CODE_PAIR_RE, &*CODE_TO_CODE_RE]
        .into_iter()
        .find_map(|re| re.captures(location))
        .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
}

/// Summarizes the unique flights among `events`.
///
/// Flights are deduplicated by flight number, falling back to the lower-cased
/// location, in first-seen order. `flight_event_count` counts every flight
/// event, duplicates included.
pub fn generate_flight_summary(events: &[TrackingEvent]) -> FlightSummary {
    let flight_events = filter_flight_events(events);

    let mut seen = HashSet::new();
    let mut flights = Vec::new();
    for event in &flight_events {
        let location = event.location.as_deref().unwrap_or_default();
        let Some(info) = extract_flight_info(location) else {
            continue;
        };
        let key = info
            .flight_number
            .clone()
            .unwrap_or_else(|| location.to_lowercase());
        if seen.insert(key) {
            flights.push(info);
        }
    }

    FlightSummary {
        has_flight_events: !flight_events.is_empty(),
        flight_event_count: flight_events.len(),
        flights,
    }
}
