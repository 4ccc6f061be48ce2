//! Page-level state: hidden postback fields and error notices.

use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::config::HIDDEN_STATE_FIELDS;
use crate::utils::{contains_any_ignore_case, element_text, parse_selector_unsafe};

static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[name]", "NAMED_INPUT_SELECTOR"));

static NOTICE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("div[class], span[class]", "NOTICE_SELECTOR"));

/// Captures the framework's hidden state fields by exact name.
///
/// Values are kept verbatim; empty values are dropped. When a name appears
/// more than once the first occurrence wins.
pub fn extract_hidden_state(document: &Html) -> BTreeMap<String, String> {
    let mut state = BTreeMap::new();
    for input in document.select(&INPUT_SELECTOR) {
        let element = input.value();
        let Some(name) = element.attr("name") else {
            continue;
        };
        if !HIDDEN_STATE_FIELDS.contains(&name) || state.contains_key(name) {
            continue;
        }
        match element.attr("value") {
            Some(value) if !value.is_empty() => {
                state.insert(name.to_string(), value.to_string());
            }
            _ => {}
        }
    }
    state
}

/// Returns the text of the page's error notice, if it shows one.
///
/// Only the first `div`/`span` whose class mentions "error" is consulted.
pub fn find_error_notice(document: &Html) -> Option<String> {
    let notice = document.select(&NOTICE_SELECTOR).find(|el| {
        el.value()
            .attr("class")
            .is_some_and(|class| contains_any_ignore_case(class, &["error"]))
    })?;
    let text = element_text(notice);
    (!text.is_empty()).then_some(text)
}
