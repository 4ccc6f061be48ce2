//! Shipment summary extraction (route, dates, article type).

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::ARTICLE_TABLE_ID;
use crate::models::ShipmentSummary;
use crate::parse::events::row_cells;
use crate::utils::{contains_any_ignore_case, element_text, parse_selector_unsafe, visible_text};

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("table[id]", "ID_TABLE_SELECTOR"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("tr", "ROW_SELECTOR"));

static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("span[id]", "LABEL_SELECTOR"));

static DELIVERED_ON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"on\s+(\d{2}-\d{2}-\d{4}\s+\d{2}:\d{2}:\d{2})").expect("delivered-on regex")
});

static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:from|origin|booked\s*at)\s*:?\s*([A-Za-z ]+)").expect("origin regex")
});

static DESTINATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:to|destination|delivery\s*at)\s*:?\s*([A-Za-z ]+)")
        .expect("destination regex")
});

static BOOKED_ON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:booked\s*on|booking\s*date)\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})")
        .expect("booked-on regex")
});

#[derive(Debug, Clone, Copy)]
enum SummaryField {
    Origin,
    Destination,
    BookedOn,
    ArticleType,
}

// First matching rule per header column.
const HEADER_RULES: &[(&[&str], SummaryField)] = &[
    (&["origin"], SummaryField::Origin),
    (&["destination"], SummaryField::Destination),
    (&["booking date", "booked"], SummaryField::BookedOn),
    (&["article type", "type"], SummaryField::ArticleType),
];

impl SummaryField {
    fn slot<'a>(&self, summary: &'a mut ShipmentSummary) -> &'a mut Option<String> {
        match self {
            SummaryField::Origin => &mut summary.origin,
            SummaryField::Destination => &mut summary.destination,
            SummaryField::BookedOn => &mut summary.booked_on,
            SummaryField::ArticleType => &mut summary.article_type,
        }
    }
}

/// Extracts route and date metadata from a result page.
///
/// Sources, in order: the article summary table, the delivery label, then a
/// free-text scan that only fills fields still missing.
pub fn extract_shipment_summary(document: &Html) -> ShipmentSummary {
    let mut summary = ShipmentSummary::default();

    read_article_table(document, &mut summary);
    summary.delivered_on = find_delivered_on(document);

    if summary.origin.is_none() || summary.destination.is_none() || summary.booked_on.is_none() {
        let text = visible_text(document);
        fill_missing(&mut summary.origin, &ORIGIN_RE, &text);
        fill_missing(&mut summary.destination, &DESTINATION_RE, &text);
        fill_missing(&mut summary.booked_on, &BOOKED_ON_RE, &text);
    }

    log::debug!("Extracted shipment summary: {:?}", summary);
    summary
}

fn read_article_table(document: &Html, summary: &mut ShipmentSummary) {
    let Some(table) = document
        .select(&TABLE_SELECTOR)
        .find(|table| table.value().attr("id") == Some(ARTICLE_TABLE_ID))
    else {
        return;
    };

    let mut rows = table.select(&ROW_SELECTOR);
    let (Some(header_row), Some(value_row)) = (rows.next(), rows.next()) else {
        return;
    };

    let headers = row_cells(header_row);
    let values = row_cells(value_row);
    for (header, value) in headers.iter().zip(values) {
        if value.is_empty() {
            continue;
        }
        if let Some((_, field)) = HEADER_RULES
            .iter()
            .find(|(needles, _)| contains_any_ignore_case(header, needles))
        {
            *field.slot(summary) = Some(value);
        }
    }
}

fn find_delivered_on(document: &Html) -> Option<String> {
    let label = document.select(&LABEL_SELECTOR).find(|span| {
        span.value()
            .attr("id")
            .is_some_and(|id| contains_any_ignore_case(id, &["label"]))
    })?;
    DELIVERED_ON_RE
        .captures(&element_text(label))
        .map(|caps| caps[1].to_string())
}

fn fill_missing(slot: &mut Option<String>, pattern: &Regex, text: &str) {
    if slot.is_some() {
        return;
    }
    *slot = pattern
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|value| !value.is_empty());
}
