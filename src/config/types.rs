//! Configuration types and CLI options.
//!
//! This module defines the library configuration, the backend description
//! and the command-line options parsed by the binary.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BACKEND_NAME, DEFAULT_BASE_URL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TRACKING_URL, DEFAULT_USER_AGENT, POLITENESS_DELAY,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A remote portal that can answer tracking queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    /// Name reported in `TrackingResult::source` and error messages
    pub name: String,
    /// Landing page visited to acquire session cookies
    pub base_url: String,
    /// Page hosting the postback tracking form
    pub tracking_url: String,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            name: DEFAULT_BACKEND_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            tracking_url: DEFAULT_TRACKING_URL.to_string(),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use post_tracker::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     timeout_seconds: 10,
///     politeness_delay: Duration::ZERO,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds; also bounds a whole tracking attempt
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Pause inserted after session bootstrap and before form submission
    pub politeness_delay: Duration,

    /// Backends tried in order until one returns tracking data
    pub backends: Vec<Backend>,
}

impl Config {
    /// Timeout applied to one complete tracking attempt against a backend.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            politeness_delay: POLITENESS_DELAY,
            backends: vec![Backend::default()],
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Serve the REST API on port 8080
/// post_tracker serve --port 8080
///
/// # Track a shipment from the terminal
/// post_tracker track LP951627598IN --flight-only
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "post_tracker",
    about = "Tracks postal shipments through the legacy web-forms tracking portal."
)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds (also bounds a whole tracking attempt)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Pause in milliseconds after session bootstrap and before submitting the form
    #[arg(long, global = true, default_value_t = 500)]
    pub politeness_delay_ms: u64,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the REST API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Track one or more shipments and print the results as JSON
    Track {
        /// Tracking numbers (format: XX123456789XX)
        #[arg(required = true)]
        tracking_numbers: Vec<String>,

        /// Return canned demo data instead of contacting the portal
        #[arg(long)]
        demo: bool,

        /// Only print flight events
        #[arg(long)]
        flight_only: bool,
    },
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent.clone(),
            politeness_delay: Duration::from_millis(opt.politeness_delay_ms),
            ..Default::default()
        }
    }
}
