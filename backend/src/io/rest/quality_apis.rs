//! # REST API for Water Quality
//!
//! Recording chlorine, dissolved solids and hardness readings, and reading
//! back their classification.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;
use shared::RecordQualityReadingRequest;

use crate::io::rest::error_response;
use crate::io::rest::mappers::quality_mapper::QualityMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/readings", get(list_readings).post(record_reading))
        .route("/readings/latest", get(get_latest_reading))
        .route("/readings/:reading_id/status", get(get_reading_status))
}

pub async fn record_reading(
    State(state): State<AppState>,
    Json(request): Json<RecordQualityReadingRequest>,
) -> impl IntoResponse {
    info!("POST /api/quality/readings - request: {:?}", request);

    let command = QualityMapper::to_command(request);
    match state.quality_service.record_reading(command, Utc::now()).await {
        Ok(reading) => (StatusCode::CREATED, Json(QualityMapper::to_dto(reading))).into_response(),
        Err(e) => error_response("Failed to record quality reading", e),
    }
}

pub async fn list_readings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/quality/readings");

    match state.quality_service.list_readings().await {
        Ok(readings) => (StatusCode::OK, Json(QualityMapper::to_dto_list(readings))).into_response(),
        Err(e) => error_response("Failed to list quality readings", e),
    }
}

/// Most recent reading, or `null` if nothing was measured yet
pub async fn get_latest_reading(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/quality/readings/latest");

    match state.quality_service.latest_reading().await {
        Ok(reading) => (StatusCode::OK, Json(reading.map(QualityMapper::to_dto))).into_response(),
        Err(e) => error_response("Failed to get latest quality reading", e),
    }
}

pub async fn get_reading_status(
    State(state): State<AppState>,
    Path(reading_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/quality/readings/{}/status", reading_id);

    match state.quality_service.reading_status(&reading_id).await {
        Ok(assessment) => {
            let response = QualityMapper::to_status_response(reading_id, assessment);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to classify quality reading", e),
    }
}
