//! Session driver for the postback tracking form.
//!
//! One driver serves one tracking attempt against one backend:
//! 1. `establish_session`: GET the landing page to collect session cookies
//! 2. `load_form`: GET the tracking page and capture its hidden state
//! 3. `submit`: POST the captured state back with the tracking number
//!
//! The driver owns its client and cookie jar. Pages are parsed synchronously
//! into owned values, so no `scraper::Html` is held across an `.await`.

mod form;
mod request;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::cookie::Jar;
use reqwest::RequestBuilder;
use scraper::Html;

use crate::config::{Backend, Config};
use crate::error_handling::{classify_reqwest_error, InitializationError, TrackError};
use crate::initialization::init_client;
use crate::parse::find_error_notice;

pub use form::{FormSnapshot, SubmitTarget};
use request::RequestHeaders;

/// Drives the cookie + hidden-state exchange with one backend.
pub struct SessionDriver {
    client: reqwest::Client,
    backend: Backend,
    politeness_delay: Duration,
    initialized: bool,
}

impl SessionDriver {
    /// Creates a driver with a fresh client and an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &Config, backend: Backend) -> Result<Self, InitializationError> {
        let jar = Arc::new(Jar::default());
        let client = init_client(config, jar)?;
        Ok(Self {
            client,
            backend,
            politeness_delay: config.politeness_delay,
            initialized: false,
        })
    }

    /// The backend this driver talks to.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Whether session cookies have been acquired and are believed valid.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Visits the landing page to acquire session cookies.
    ///
    /// No-op once initialized. A failure here ends the attempt.
    pub async fn establish_session(&mut self) -> Result<(), TrackError> {
        if self.initialized {
            return Ok(());
        }

        debug!("Establishing session with {}", self.backend.base_url);
        let request =
            RequestHeaders::apply_to_request_builder(self.client.get(&self.backend.base_url));
        request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TrackError::Session {
                backend: self.backend.name.clone(),
                message: e.to_string(),
            })?;

        self.initialized = true;
        info!("Session established with {}", self.backend.name);
        self.pause().await;
        Ok(())
    }

    /// Loads the tracking page and captures its form state.
    ///
    /// A page without `__VIEWSTATE` resets the driver to uninitialized and
    /// yields `TrackError::Protocol`.
    pub async fn load_form(&mut self) -> Result<FormSnapshot, TrackError> {
        let request = RequestHeaders::apply_to_request_builder(
            self.client.get(&self.backend.tracking_url),
        );
        let request = RequestHeaders::with_referer(request, &self.backend.base_url);
        let body = self.send_for_text(request).await?;

        match FormSnapshot::capture(&body) {
            Some(snapshot) => {
                debug!(
                    "Captured {} hidden fields from {} (input: {}, target: {:?})",
                    snapshot.hidden_state.len(),
                    self.backend.name,
                    snapshot.input_field,
                    snapshot.target
                );
                Ok(snapshot)
            }
            None => {
                self.initialized = false;
                warn!("No form state on {} tracking page", self.backend.name);
                Err(TrackError::Protocol {
                    backend: self.backend.name.clone(),
                    message: "Session may have expired.".to_string(),
                })
            }
        }
    }

    /// Posts the form for `tracking_number` and returns the result page body.
    ///
    /// A result page showing an error notice yields `TrackError::Remote`.
    pub async fn submit(
        &self,
        form: &FormSnapshot,
        tracking_number: &str,
    ) -> Result<String, TrackError> {
        self.pause().await;

        let tracking_url = &self.backend.tracking_url;
        let request = RequestHeaders::apply_to_request_builder(self.client.post(tracking_url));
        let request = RequestHeaders::with_referer(request, tracking_url);
        let request = RequestHeaders::with_origin_of(request, tracking_url);
        let body = self
            .send_for_text(request.form(&form.form_body(tracking_number)))
            .await?;

        if let Some(message) = page_error_notice(&body) {
            warn!("{} reported an error: {}", self.backend.name, message);
            return Err(TrackError::Remote {
                backend: self.backend.name.clone(),
                status: None,
                message,
            });
        }
        Ok(body)
    }

    /// Runs the full exchange and returns the result page body.
    pub async fn fetch_result_page(&mut self, tracking_number: &str) -> Result<String, TrackError> {
        self.establish_session().await?;
        let form = self.load_form().await?;
        self.submit(&form, tracking_number).await
    }

    async fn send_for_text(&self, request: RequestBuilder) -> Result<String, TrackError> {
        let response = request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| classify_reqwest_error(&self.backend.name, &e))?;
        response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&self.backend.name, &e))
    }

    async fn pause(&self) {
        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }
    }
}

fn page_error_notice(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    find_error_notice(&document)
}
