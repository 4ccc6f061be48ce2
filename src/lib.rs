//! post_tracker library: postal shipment tracking over a legacy postback form
//!
//! This library drives the cookie and hidden-state handshake of a web-forms
//! tracking portal, parses the returned history into normalized events, and
//! derives status, route metadata and flight information from it.
//!
//! # Example
//!
//! ```no_run
//! use post_tracker::{Config, Tracker};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let tracker = Tracker::new(Config::default());
//! let result = tracker.track("LP951627598IN", false).await;
//! match result.error {
//!     None => println!("{}: {}", result.tracking_number, result.status),
//!     Some(e) => eprintln!("{}: {}", result.tracking_number, e),
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod flight;
pub mod initialization;
pub mod models;
pub mod parse;
pub mod server;
pub mod session;
pub mod status;
mod tracker;
mod utils;

// Re-export public API
pub use config::{Backend, Config, LogFormat, LogLevel};
pub use error_handling::{ErrorType, InitializationError, TrackError, TrackingStats};
pub use flight::{
    extract_flight_info, filter_flight_events, generate_flight_summary, is_flight_event,
};
pub use models::{FlightInfo, FlightSummary, ShipmentSummary, TrackingEvent, TrackingResult};
pub use status::determine_status;
pub use tracker::{demo_result, validate_tracking_number, Tracker};
