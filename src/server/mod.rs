//! REST API for tracking lookups.
//!
//! Endpoints:
//! - `/`, `/health` - liveness probe
//! - `/status` - tracking statistics as JSON
//! - `/metrics` - Prometheus-compatible counters
//! - `/track/{tracking_number}`, `/track?id=` - single shipment
//! - `/track/bulk` - up to ten shipments at once (POST)
//!
//! Every response carries permissive CORS headers.

mod handlers;
mod types;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use handlers::{
    bulk_track_handler, health_handler, metrics_handler, not_found_handler, status_handler,
    track_path_handler, track_query_handler,
};
pub use types::{
    ApiError, AppState, BulkTrackingRequest, BulkTrackingResponse, HealthResponse,
    TrackingResponse,
};

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .route("/track", get(track_query_handler))
        .route("/track/bulk", post(bulk_track_handler))
        .route("/track/{tracking_number}", get(track_path_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Binds `host:port` and serves the API until the process exits.
pub async fn start_server(host: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}:{}: {}", host, port, e))?;

    log::info!("API server listening on http://{}:{}/", host, port);
    log::info!("  - Health: http://{}:{}/health", host, port);
    log::info!("  - Track: http://{}:{}/track/{{tracking_number}}", host, port);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}

async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
}
