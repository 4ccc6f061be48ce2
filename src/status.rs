//! Shipment status classification.

use crate::models::TrackingEvent;

/// Status reported when the portal returned no history.
pub const NO_INFORMATION: &str = "No tracking information available";

/// Ordered classification rules; the first rule whose needle appears in the
/// latest event text wins. "out for delivery" must precede "deliver".
const STATUS_RULES: &[(&[&str], &str)] = &[
    (&["out for delivery"], "Out for Delivery"),
    (&["deliver"], "Delivered"),
    (&["transit", "dispatch"], "In Transit"),
    (&["book"], "Booked"),
    (&["return"], "Returned"),
];

/// Derives a coarse status from the most recent (first) event.
///
/// Unrecognized event text is passed through unchanged.
pub fn determine_status(events: &[TrackingEvent]) -> String {
    let Some(latest) = events.first() else {
        return NO_INFORMATION.to_string();
    };

    let text = latest.event.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
        .map(|(_, status)| status.to_string())
        .unwrap_or_else(|| latest.event.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(text: &str) -> TrackingEvent {
        TrackingEvent {
            date: "16-01-2026".to_string(),
            time: "10:00:00".to_string(),
            office: String::new(),
            event: text.to_string(),
            location: None,
        }
    }

    #[test]
    fn test_no_events() {
        assert_eq!(determine_status(&[]), NO_INFORMATION);
    }

    #[test]
    fn test_out_for_delivery_precedes_delivered() {
        assert_eq!(
            determine_status(&[event("Out for delivery")]),
            "Out for Delivery"
        );
        assert_eq!(determine_status(&[event("Item Delivered")]), "Delivered");
    }

    #[test]
    fn test_only_latest_event_is_considered() {
        let events = vec![event("Item Dispatched"), event("Item Delivered")];
        assert_eq!(determine_status(&events), "In Transit");
    }

    #[test]
    fn test_remaining_rules() {
        assert_eq!(determine_status(&[event("In TRANSIT to hub")]), "In Transit");
        assert_eq!(determine_status(&[event("Item Booked")]), "Booked");
        assert_eq!(determine_status(&[event("Item returned to sender")]), "Returned");
    }

    #[test]
    fn test_unknown_text_passes_through() {
        assert_eq!(
            determine_status(&[event("Aircraft take off")]),
            "Aircraft take off"
        );
    }
}
