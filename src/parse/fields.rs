//! Form field discovery.
//!
//! The portal renders its controls with generated names
//! (`ctl00$ContentPlaceHolder1$...`), so the tracking input and submit control
//! are located with ranked heuristics. Rules are evaluated in order and the
//! first hit wins; there is no scoring.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{contains_any_ignore_case, parse_selector_unsafe};

static TEXT_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[type='text']", "TEXT_INPUT_SELECTOR"));

static SUBMIT_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[type='submit']", "SUBMIT_INPUT_SELECTOR"));

static BUTTON_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input[type='button']", "BUTTON_INPUT_SELECTOR"));

static SUBMIT_BUTTON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("button[type='submit']", "SUBMIT_BUTTON_SELECTOR"));

static BUTTON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("button", "BUTTON_SELECTOR"));

// <prefix>doPostBack('<target>', ...), e.g. __doPostBack('ctl00$btnSearch','')
static POSTBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w$]*(?i:dopostback)\s*\(\s*'([^']+)'").expect("postback handler regex")
});

const FIELD_NEEDLES: &[&str] = &["track", "item", "article", "consignment"];

/// One heuristic for locating the tracking number input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Text input whose `id` contains the needle (case-insensitive)
    IdContains(&'static str),
    /// Text input whose `name` contains the needle (case-insensitive)
    NameContains(&'static str),
    /// First text input whose name is not a framework field (`__` prefix)
    FirstVisible,
}

/// Input discovery rules in evaluation order.
pub const INPUT_RULES: &[InputRule] = &[
    InputRule::IdContains(FIELD_NEEDLES[0]),
    InputRule::IdContains(FIELD_NEEDLES[1]),
    InputRule::IdContains(FIELD_NEEDLES[2]),
    InputRule::IdContains(FIELD_NEEDLES[3]),
    InputRule::NameContains(FIELD_NEEDLES[0]),
    InputRule::NameContains(FIELD_NEEDLES[1]),
    InputRule::NameContains(FIELD_NEEDLES[2]),
    InputRule::NameContains(FIELD_NEEDLES[3]),
    InputRule::FirstVisible,
];

impl InputRule {
    /// Returns the `name` of the first text input satisfying this rule.
    pub fn find(&self, document: &Html) -> Option<String> {
        document.select(&TEXT_INPUT_SELECTOR).find_map(|input| {
            let name = input.value().attr("name").filter(|n| !n.is_empty())?;
            let hit = match self {
                InputRule::IdContains(needle) => input
                    .value()
                    .attr("id")
                    .is_some_and(|id| contains_any_ignore_case(id, &[*needle])),
                InputRule::NameContains(needle) => contains_any_ignore_case(name, &[*needle]),
                InputRule::FirstVisible => !name.starts_with("__"),
            };
            hit.then(|| name.to_string())
        })
    }
}

/// One heuristic for locating the submit button name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRule {
    /// Submit input whose value contains one of the needles
    SubmitValueContains(&'static [&'static str]),
    /// Any submit input
    AnySubmitInput,
    /// Button-typed input whose value contains one of the needles
    ButtonValueContains(&'static [&'static str]),
    /// `<button type="submit">`
    SubmitButtonElement,
}

/// Submit button discovery rules in evaluation order.
pub const SUBMIT_RULES: &[SubmitRule] = &[
    SubmitRule::SubmitValueContains(&["track", "article"]),
    SubmitRule::AnySubmitInput,
    SubmitRule::ButtonValueContains(&["track", "submit", "search", "go"]),
    SubmitRule::SubmitButtonElement,
];

impl SubmitRule {
    /// Returns the `name` of the first control satisfying this rule.
    pub fn find(&self, document: &Html) -> Option<String> {
        match self {
            SubmitRule::SubmitValueContains(needles) => {
                first_named(document, &SUBMIT_INPUT_SELECTOR, |el| value_contains(el, needles))
            }
            SubmitRule::AnySubmitInput => first_named(document, &SUBMIT_INPUT_SELECTOR, |_| true),
            SubmitRule::ButtonValueContains(needles) => {
                first_named(document, &BUTTON_INPUT_SELECTOR, |el| value_contains(el, needles))
            }
            SubmitRule::SubmitButtonElement => {
                first_named(document, &SUBMIT_BUTTON_SELECTOR, |_| true)
            }
        }
    }
}

fn first_named(
    document: &Html,
    selector: &Selector,
    predicate: impl Fn(ElementRef<'_>) -> bool,
) -> Option<String> {
    document
        .select(selector)
        .filter(|el| predicate(*el))
        .find_map(|el| el.value().attr("name").filter(|n| !n.is_empty()))
        .map(str::to_string)
}

fn value_contains(element: ElementRef<'_>, needles: &[&str]) -> bool {
    element
        .value()
        .attr("value")
        .is_some_and(|value| contains_any_ignore_case(value, needles))
}

/// Submit controls discovered on the form page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    /// Name of the submit button to post
    pub button_name: Option<String>,
    /// Control id passed to the page's postback handler
    pub postback_target: Option<String>,
}

/// Finds the name of the tracking number input.
pub fn find_input_field(document: &Html) -> Option<String> {
    INPUT_RULES.iter().find_map(|rule| {
        let found = rule.find(document);
        if let Some(ref name) = found {
            log::debug!("Input field {} matched rule {:?}", name, rule);
        }
        found
    })
}

/// Finds the submit button name and any inline postback target.
///
/// Both are looked up independently; when a postback target exists the
/// submission goes through the postback fields instead of the button.
pub fn find_submit_control(document: &Html) -> SubmitControl {
    let button_name = SUBMIT_RULES.iter().find_map(|rule| {
        let found = rule.find(document);
        if let Some(ref name) = found {
            log::debug!("Submit button {} matched rule {:?}", name, rule);
        }
        found
    });

    SubmitControl {
        button_name,
        postback_target: find_postback_target(document),
    }
}

/// Scans `<button>` onclick handlers for a postback call such as
/// `__doPostBack('<target>', ...)`.
///
/// Other calls in the handler (`confirm(...)`, help popups) are ignored.
pub fn find_postback_target(document: &Html) -> Option<String> {
    document.select(&BUTTON_SELECTOR).find_map(|button| {
        let onclick = button.value().attr("onclick")?;
        log::debug!("Found button with onclick: {}", onclick);
        POSTBACK_RE
            .captures(onclick)
            .map(|caps| caps[1].to_string())
    })
}

/// Lists `(name, id)` of every text input, for diagnostics when discovery fails.
pub fn describe_text_inputs(document: &Html) -> Vec<(String, String)> {
    document
        .select(&TEXT_INPUT_SELECTOR)
        .map(|input| {
            (
                input.value().attr("name").unwrap_or_default().to_string(),
                input.value().attr("id").unwrap_or_default().to_string(),
            )
        })
        .collect()
}
