//! Error categorization.
//!
//! Maps `reqwest` failures onto the tracker's error kinds.

use super::types::TrackError;

/// Categorizes a `reqwest::Error` raised while talking to `backend`.
///
/// HTTP status failures become `Remote`, timeouts become `Timeout`, and every
/// other failure (connect, body, decode, redirect...) is treated as a
/// transport problem.
pub fn classify_reqwest_error(backend: &str, error: &reqwest::Error) -> TrackError {
    if let Some(status) = error.status() {
        if status.is_client_error() || status.is_server_error() {
            return TrackError::Remote {
                backend: backend.to_string(),
                status: Some(status.as_u16()),
                message: status.to_string(),
            };
        }
    }

    if error.is_timeout() {
        TrackError::Timeout {
            backend: backend.to_string(),
        }
    } else {
        TrackError::Transport {
            backend: backend.to_string(),
            message: error.to_string(),
        }
    }
}
