//! Tracking handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use super::super::types::{
    timestamp, ApiError, AppState, BulkTrackingRequest, BulkTrackingResponse, TrackQuery,
    TrackingResponse,
};
use crate::config::MAX_BATCH_SIZE;

/// `GET /track/{tracking_number}`
pub async fn track_path_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<TrackingResponse>, ApiError> {
    track_one(state, tracking_number, query).await
}

/// `GET /track?id=`
pub async fn track_query_handler(
    State(state): State<AppState>,
    Query(mut query): Query<TrackQuery>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let tracking_number = query
        .id
        .take()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing tracking number (id)".to_string()))?;
    track_one(state, tracking_number, query).await
}

async fn track_one(
    state: AppState,
    tracking_number: String,
    query: TrackQuery,
) -> Result<Json<TrackingResponse>, ApiError> {
    let tracker = state.tracker.clone();
    let demo = query.demo;
    let result = tokio::spawn(async move { tracker.track(&tracking_number, demo).await })
        .await
        .map_err(|e| {
            log::error!("Tracking task failed: {:?}", e);
            ApiError::Internal(e.to_string())
        })?;

    Ok(Json(TrackingResponse::from_result(result, query.flight_only)))
}

/// `POST /track/bulk`
pub async fn bulk_track_handler(
    State(state): State<AppState>,
    body: Result<Json<BulkTrackingRequest>, JsonRejection>,
) -> Result<Json<BulkTrackingResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let count = request.tracking_numbers.len();
    if count == 0 || count > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest(format!(
            "tracking_numbers must contain between 1 and {} items (got {})",
            MAX_BATCH_SIZE, count
        )));
    }

    let results: Vec<TrackingResponse> = state
        .tracker
        .track_batch(request.tracking_numbers, request.demo)
        .await
        .into_iter()
        .map(|result| TrackingResponse::from_result(result, request.flight_only))
        .collect();

    let successful = results.iter().filter(|r| r.success).count();
    let failed = results.len() - successful;
    log::info!(
        "Bulk request: {} tracked, {} successful, {} failed",
        results.len(),
        successful,
        failed
    );

    Ok(Json(BulkTrackingResponse {
        success: failed == 0,
        total: results.len(),
        successful,
        failed,
        results,
        timestamp: timestamp(),
    }))
}
