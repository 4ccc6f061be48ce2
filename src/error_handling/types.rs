//! Error type definitions.
//!
//! This module defines the initialization errors, the tracking errors raised
//! while talking to a portal, and the coarse error categories used for
//! statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of one tracking attempt.
///
/// Every variant except `Validation` carries the backend name so the message
/// stays meaningful once flattened into `TrackingResult::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Malformed tracking number. Never reaches the network.
    #[error(
        "Invalid tracking number format. Expected format: XX123456789XX (e.g., LP951627598IN)"
    )]
    Validation {
        /// The normalized input that failed validation
        tracking_number: String,
    },

    /// The bootstrap GET that acquires session cookies failed.
    #[error("Could not establish session with {backend}: {message}")]
    Session {
        /// Backend name
        backend: String,
        /// Underlying failure
        message: String,
    },

    /// The form page did not have the expected shape (stale or expired state).
    #[error("Could not extract form state from {backend}. {message}")]
    Protocol {
        /// Backend name
        backend: String,
        /// What was missing
        message: String,
    },

    /// A request or the whole attempt exceeded its timeout.
    #[error("Request to {backend} timed out.")]
    Timeout {
        /// Backend name
        backend: String,
    },

    /// Connection-level failure.
    #[error("Network error from {backend}: {message}")]
    Transport {
        /// Backend name
        backend: String,
        /// Underlying failure
        message: String,
    },

    /// HTTP error status, or an explicit error message in the returned page.
    #[error("Error from {backend}: {message}")]
    Remote {
        /// Backend name
        backend: String,
        /// Status code, when the failure came from the HTTP layer
        status: Option<u16>,
        /// Status text or the page's error message
        message: String,
    },
}

impl TrackError {
    /// Returns the statistics category of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            TrackError::Validation { .. } => ErrorType::Validation,
            TrackError::Session { .. } => ErrorType::Session,
            TrackError::Protocol { .. } => ErrorType::Protocol,
            TrackError::Timeout { .. } => ErrorType::Timeout,
            TrackError::Transport { .. } => ErrorType::Transport,
            TrackError::Remote { status: Some(_), .. } => ErrorType::RemoteStatus,
            TrackError::Remote { status: None, .. } => ErrorType::RemoteMessage,
        }
    }
}

/// Coarse categories of tracking failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Malformed tracking number
    Validation,
    /// Bootstrap request failed
    Session,
    /// Form page missing its postback state
    Protocol,
    /// Attempt exceeded its deadline
    Timeout,
    /// Connection or body read failure
    Transport,
    /// HTTP 4xx/5xx from the portal
    RemoteStatus,
    /// Error element in an otherwise successful page
    RemoteMessage,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Stable snake_case label used in `/status` and `/metrics`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Validation => "validation",
            ErrorType::Session => "session",
            ErrorType::Protocol => "protocol",
            ErrorType::Timeout => "timeout",
            ErrorType::Transport => "transport",
            ErrorType::RemoteStatus => "remote_status",
            ErrorType::RemoteMessage => "remote_message",
        }
    }
}
