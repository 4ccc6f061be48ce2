//! HTTP client initialization.
//!
//! Every tracking attempt gets its own client and cookie jar; the portal's
//! session cookies and hidden fields are single-use and must not leak between
//! concurrent lookups.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes an HTTP client bound to `jar`.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Per-request timeout from the config
/// - The supplied cookie jar as cookie store
/// - Redirect following (reqwest default policy)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config, jar: Arc<Jar>) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .cookie_provider(jar)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_fresh_jar() {
        let config = Config::default();
        let client = init_client(&config, Arc::new(Jar::default()));
        assert!(client.is_ok());
    }
}
