//! Tracking history extraction.
//!
//! The result page comes in two layout families:
//! - a list (`<ul class="...events...">`) with one `<li>` per event
//! - a table (grid view) with one row per event
//!
//! The list layout is tried first; the table layout is the fallback.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::models::TrackingEvent;
use crate::utils::{contains_any_ignore_case, element_text, parse_selector_unsafe};

static LIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("ul[class], ol[class]", "LIST_SELECTOR"));

static LIST_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("li", "LIST_ITEM_SELECTOR"));

static TIME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("time", "TIME_SELECTOR"));

static DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("strong, b", "DESCRIPTION_SELECTOR"));

static STYLED_DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("div[style]", "STYLED_DIV_SELECTOR"));

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("table", "TABLE_SELECTOR"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("tr", "ROW_SELECTOR"));

/// Substrings of a table id that mark it as the history grid.
const TABLE_ID_MARKERS: &[&str] = &["grd", "grid", "gv", "track", "event", "result"];

/// Substrings of a table class that mark it as the history grid.
const TABLE_CLASS_MARKERS: &[&str] = &["grd", "grid", "gv", "track", "event", "result", "table"];

/// Header words that mark a table as the history grid.
const HEADER_WORDS: &[&str] = &["date", "time", "office", "event", "status", "location"];

/// Parses the tracking history, most recent first as laid out by the page.
///
/// Returns an empty vector when neither layout is present.
pub fn parse_tracking_events(document: &Html) -> Vec<TrackingEvent> {
    if let Some(list) = find_events_list(document) {
        let events = parse_list_layout(list);
        log::debug!("Parsed {} events from list layout", events.len());
        return events;
    }

    match find_events_table(document) {
        Some(table) => {
            let events = parse_table_layout(table);
            log::debug!("Parsed {} events from table layout", events.len());
            events
        }
        None => {
            log::debug!(
                "No tracking history found ({} tables on page)",
                document.select(&TABLE_SELECTOR).count()
            );
            Vec::new()
        }
    }
}

fn find_events_list(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&LIST_SELECTOR).find(|list| {
        list.value()
            .attr("class")
            .is_some_and(|class| contains_any_ignore_case(class, &["events"]))
    })
}

fn parse_list_layout(list: ElementRef<'_>) -> Vec<TrackingEvent> {
    list.select(&LIST_ITEM_SELECTOR)
        .filter_map(|item| {
            let description = item
                .select(&DESCRIPTION_SELECTOR)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())?;

            let stamp = item
                .select(&TIME_SELECTOR)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let mut parts = stamp.split_whitespace();
            let date = parts.next().unwrap_or_default().to_string();
            let time = parts.next().unwrap_or_default().to_string();

            let location = item
                .select(&STYLED_DIV_SELECTOR)
                .find(|div| {
                    div.value()
                        .attr("style")
                        .is_some_and(|style| contains_any_ignore_case(style, &["color"]))
                })
                .map(element_text)
                .filter(|text| !text.is_empty());

            Some(TrackingEvent {
                date,
                time,
                office: String::new(),
                event: description,
                location,
            })
        })
        .collect()
}

fn find_events_table(document: &Html) -> Option<ElementRef<'_>> {
    let marked_by = |attr: &str, markers: &[&str]| {
        document.select(&TABLE_SELECTOR).find(|table| {
            table
                .value()
                .attr(attr)
                .is_some_and(|value| contains_any_ignore_case(value, markers))
        })
    };

    marked_by("id", TABLE_ID_MARKERS)
        .or_else(|| marked_by("class", TABLE_CLASS_MARKERS))
        .or_else(|| {
            document.select(&TABLE_SELECTOR).find(|table| {
                table.select(&ROW_SELECTOR).next().is_some_and(|header| {
                    contains_any_ignore_case(&element_text(header), HEADER_WORDS)
                })
            })
        })
}

fn parse_table_layout(table: ElementRef<'_>) -> Vec<TrackingEvent> {
    table
        .select(&ROW_SELECTOR)
        .skip(1)
        .filter_map(|row| {
            let cells = row_cells(row);
            if cells.len() < 3 {
                return None;
            }
            let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
            let event = TrackingEvent {
                date: cell(0),
                time: cell(1),
                office: cell(2),
                event: cell(3),
                location: cells.get(4).cloned(),
            };
            (!event.date.is_empty() || !event.event.is_empty()).then_some(event)
        })
        .collect()
}

/// Text of the row's direct `td`/`th` children.
pub(crate) fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(element_text)
        .collect()
}
