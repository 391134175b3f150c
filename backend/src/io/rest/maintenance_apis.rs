//! # REST API for Maintenance
//!
//! The routine catalog with its per-run step checklist, the maintenance log
//! and the agenda of scheduled runs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use log::info;
use shared::{AgendaDayRequest, CompleteMaintenanceRequest, ToggleStepRequest};

use crate::domain::dates::parse_local_date;
use crate::io::rest::error_response;
use crate::io::rest::mappers::maintenance_mapper::MaintenanceMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/catalog/:definition_id/run", post(open_run))
        .route("/catalog/:definition_id/steps/:step_number", put(toggle_step))
        .route("/logs", get(list_logs).post(complete_maintenance))
        .route("/agenda/upcoming", get(get_upcoming))
        .route("/agenda/day", get(get_agenda_day))
}

pub async fn get_catalog(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance/catalog");
    let catalog = state.maintenance_service.catalog();
    (StatusCode::OK, Json(MaintenanceMapper::catalog_to_dto(catalog))).into_response()
}

/// Reset the step checklist of a routine before performing it
pub async fn open_run(
    State(state): State<AppState>,
    Path(definition_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/maintenance/catalog/{}/run", definition_id);

    match state.maintenance_service.open_run(&definition_id) {
        Ok(definition) => {
            (StatusCode::OK, Json(MaintenanceMapper::definition_to_dto(definition))).into_response()
        }
        Err(e) => error_response("Failed to open maintenance run", e),
    }
}

pub async fn toggle_step(
    State(state): State<AppState>,
    Path((definition_id, step_number)): Path<(String, u32)>,
    Json(request): Json<ToggleStepRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/maintenance/catalog/{}/steps/{} - completed: {}",
        definition_id, step_number, request.completed
    );

    match state
        .maintenance_service
        .toggle_step(&definition_id, step_number, request.completed)
    {
        Ok(definition) => {
            (StatusCode::OK, Json(MaintenanceMapper::definition_to_dto(definition))).into_response()
        }
        Err(e) => error_response("Failed to toggle maintenance step", e),
    }
}

pub async fn list_logs(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance/logs");

    match state.maintenance_service.list_logs().await {
        Ok(logs) => (StatusCode::OK, Json(MaintenanceMapper::logs_to_dto(logs))).into_response(),
        Err(e) => error_response("Failed to list maintenance logs", e),
    }
}

pub async fn complete_maintenance(
    State(state): State<AppState>,
    Json(request): Json<CompleteMaintenanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/maintenance/logs - request: {:?}", request);

    let command = MaintenanceMapper::to_complete_command(request);
    match state
        .maintenance_service
        .complete_maintenance(command, Utc::now())
        .await
    {
        Ok(entry) => (StatusCode::CREATED, Json(MaintenanceMapper::log_to_dto(entry))).into_response(),
        Err(e) => error_response("Failed to record maintenance", e),
    }
}

pub async fn get_upcoming(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/maintenance/agenda/upcoming");

    match state.maintenance_service.upcoming(Utc::now()).await {
        Ok(items) => (StatusCode::OK, Json(MaintenanceMapper::agenda_to_dto(items))).into_response(),
        Err(e) => error_response("Failed to load maintenance agenda", e),
    }
}

pub async fn get_agenda_day(
    State(state): State<AppState>,
    Query(request): Query<AgendaDayRequest>,
) -> impl IntoResponse {
    info!("GET /api/maintenance/agenda/day - date: {}", request.date);

    let date = match parse_local_date(&request.date) {
        Ok(date) => date,
        Err(e) => return error_response("Invalid agenda day", e),
    };
    match state.maintenance_service.due_on(date).await {
        Ok(items) => (StatusCode::OK, Json(MaintenanceMapper::agenda_to_dto(items))).into_response(),
        Err(e) => error_response("Failed to load maintenance agenda", e),
    }
}
