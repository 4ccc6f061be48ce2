//! Tracking statistics handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, ErrorCounts, StatusResponse};

/// JSON statistics endpoint
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = state.tracker.stats();
    Json(StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        successes: stats.successes(),
        demo: stats.demo(),
        errors: ErrorCounts {
            total: stats.total_errors(),
            by_type: stats.error_counts().into_iter().collect(),
        },
    })
}

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let stats = state.tracker.stats();

    let mut metrics = format!(
        r#"# HELP post_tracker_uptime_seconds Seconds since the server started
# TYPE post_tracker_uptime_seconds gauge
post_tracker_uptime_seconds {}

# HELP post_tracker_successes_total Lookups answered with portal data
# TYPE post_tracker_successes_total counter
post_tracker_successes_total {}

# HELP post_tracker_demo_total Lookups answered with demo data
# TYPE post_tracker_demo_total counter
post_tracker_demo_total {}

# HELP post_tracker_errors_total Failed tracking attempts by error type
# TYPE post_tracker_errors_total counter
"#,
        state.start_time.elapsed().as_secs_f64(),
        stats.successes(),
        stats.demo(),
    );
    for (error_type, count) in stats.error_counts() {
        metrics.push_str(&format!(
            "post_tracker_errors_total{{type=\"{}\"}} {}\n",
            error_type, count
        ));
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    )
        .into_response()
}
