//! Captured form state and POST body construction.

use std::collections::BTreeMap;

use scraper::Html;

use crate::config::{
    DEFAULT_INPUT_FIELD, DEFAULT_SUBMIT_BUTTON, EVENT_ARGUMENT_FIELD, EVENT_TARGET_FIELD,
    SUBMIT_BUTTON_VALUE, VIEWSTATE_FIELD,
};
use crate::parse::{
    describe_text_inputs, extract_hidden_state, find_input_field, find_submit_control,
};

/// How the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    /// Raise a postback for this control id via `__EVENTTARGET`
    Postback(String),
    /// Post the named submit button with its caption
    Button(String),
}

/// Everything needed to replay the tracking form.
///
/// Hidden state is opaque and echoed back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Hidden state fields by name, values verbatim
    pub hidden_state: BTreeMap<String, String>,
    /// Name of the tracking number input
    pub input_field: String,
    /// Submission control
    pub target: SubmitTarget,
}

impl FormSnapshot {
    /// Captures the form from a page body.
    ///
    /// Returns `None` when the page carries no `__VIEWSTATE`, which is how an
    /// expired session or an error page presents itself. Missing input or
    /// submit names fall back to the portal's well-known control names.
    pub fn capture(html: &str) -> Option<Self> {
        let document = Html::parse_document(html);

        let hidden_state = extract_hidden_state(&document);
        if !hidden_state.contains_key(VIEWSTATE_FIELD) {
            return None;
        }

        let input_field = find_input_field(&document).unwrap_or_else(|| {
            log::debug!(
                "No tracking input matched, using {} (text inputs seen: {:?})",
                DEFAULT_INPUT_FIELD,
                describe_text_inputs(&document)
            );
            DEFAULT_INPUT_FIELD.to_string()
        });

        let control = find_submit_control(&document);
        let target = match (control.postback_target, control.button_name) {
            (Some(postback), _) => SubmitTarget::Postback(postback),
            (None, Some(button)) => SubmitTarget::Button(button),
            (None, None) => {
                log::debug!("No submit control matched, using {}", DEFAULT_SUBMIT_BUTTON);
                SubmitTarget::Button(DEFAULT_SUBMIT_BUTTON.to_string())
            }
        };

        Some(Self {
            hidden_state,
            input_field,
            target,
        })
    }

    /// Builds the url-encoded POST body for `tracking_number`.
    pub fn form_body(&self, tracking_number: &str) -> Vec<(String, String)> {
        let postback = matches!(self.target, SubmitTarget::Postback(_));
        let mut body: Vec<(String, String)> = self
            .hidden_state
            .iter()
            .filter(|(name, _)| {
                !postback
                    || (name.as_str() != EVENT_TARGET_FIELD && name.as_str() != EVENT_ARGUMENT_FIELD)
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        body.push((self.input_field.clone(), tracking_number.to_string()));

        match &self.target {
            SubmitTarget::Postback(target) => {
                body.push((EVENT_TARGET_FIELD.to_string(), target.clone()));
                body.push((EVENT_ARGUMENT_FIELD.to_string(), String::new()));
            }
            SubmitTarget::Button(button) => {
                body.push((button.clone(), SUBMIT_BUTTON_VALUE.to_string()));
            }
        }
        body
    }
}
