//! REST handlers.

mod health;
mod status;
mod track;

pub use health::health_handler;
pub use status::{metrics_handler, status_handler};
pub use track::{bulk_track_handler, track_path_handler, track_query_handler};

use super::types::ApiError;

/// JSON 404 for unknown routes
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}
