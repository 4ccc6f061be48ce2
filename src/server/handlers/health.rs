//! Health probe handler.

use axum::Json;

use super::super::types::{timestamp, HealthResponse};
use crate::config::SERVICE_NAME;

/// Liveness probe served on `/` and `/health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: timestamp(),
    })
}
