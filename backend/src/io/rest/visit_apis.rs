//! # REST API for Visits
//!
//! Planning a visit, working through its checklist and closing it into the
//! visit log. The plan lives in memory until the visit is finished.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::info;
use shared::FinishVisitRequest;

use crate::io::rest::error_response;
use crate::io::rest::mappers::visit_mapper::VisitMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plan", get(get_plan).post(generate_plan))
        .route("/progress", get(get_progress))
        .route("/start", post(start_visit))
        .route("/tasks/:task_id/complete", post(complete_task))
        .route("/finish", post(finish_visit))
        .route("/logs", get(list_visit_logs))
}

/// Build a fresh checklist, discarding the previous plan
pub async fn generate_plan(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/visit/plan");

    match state.visit_service.generate_plan(Utc::now()).await {
        Ok(plan) => (StatusCode::OK, Json(VisitMapper::plan_to_dto(plan))).into_response(),
        Err(e) => error_response("Failed to plan visit", e),
    }
}

pub async fn get_plan(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/visit/plan");
    let plan = state.visit_service.current_plan();
    (StatusCode::OK, Json(VisitMapper::plan_to_dto(plan))).into_response()
}

pub async fn get_progress(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/visit/progress");
    let progress = state.visit_service.progress();
    (StatusCode::OK, Json(VisitMapper::progress_to_dto(progress))).into_response()
}

pub async fn start_visit(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/visit/start");
    let plan = state.visit_service.start_visit(Utc::now());
    (StatusCode::OK, Json(VisitMapper::plan_to_dto(plan))).into_response()
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/visit/tasks/{}/complete", task_id);

    match state.visit_service.complete_task(&task_id) {
        Ok(task) => (StatusCode::OK, Json(VisitMapper::task_to_dto(task))).into_response(),
        Err(e) => error_response("Failed to complete visit task", e),
    }
}

pub async fn finish_visit(
    State(state): State<AppState>,
    Json(request): Json<FinishVisitRequest>,
) -> impl IntoResponse {
    info!("POST /api/visit/finish");

    match state.visit_service.finish_visit(request.notes, Utc::now()).await {
        Ok(entry) => (StatusCode::CREATED, Json(VisitMapper::log_to_dto(entry))).into_response(),
        Err(e) => error_response("Failed to finish visit", e),
    }
}

pub async fn list_visit_logs(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/visit/logs");

    match state.visit_service.list_visit_logs().await {
        Ok(logs) => {
            let logs: Vec<_> = logs.into_iter().map(VisitMapper::log_to_dto).collect();
            (StatusCode::OK, Json(logs)).into_response()
        }
        Err(e) => error_response("Failed to list visit logs", e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{read_json, send, TestApp};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_full_visit_flow() {
        let app = TestApp::new().await;

        let response = send(&app.router, "POST", "/api/visit/plan", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let plan: Value = read_json(response).await;
        let tasks = plan["tasks"].as_array().unwrap();
        // Fresh station: measurement, every routine, then registration
        assert_eq!(tasks.len(), 12);
        assert_eq!(tasks[0]["id"], "measurement");
        assert_eq!(tasks[11]["id"], "registration");
        assert!(plan["started_at"].is_null());

        let response = send(&app.router, "POST", "/api/visit/start", None).await;
        let started: Value = read_json(response).await;
        assert!(started["started_at"].is_string());

        let response = send(&app.router, "POST", "/api/visit/tasks/maintenance::2/complete", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let task: Value = read_json(response).await;
        assert_eq!(task["completed"], true);

        let response = send(&app.router, "GET", "/api/visit/progress", None).await;
        let progress: Value = read_json(response).await;
        assert_eq!(progress["completed_tasks"], 1);
        assert_eq!(progress["total_tasks"], 12);

        let response = send(&app.router, "POST", "/api/visit/finish", Some(json!({ "notes": "ok" }))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let entry: Value = read_json(response).await;
        assert_eq!(entry["completed_task_titles"][0], "Dual Filter Backwash (Sand and Carbon)");

        let response = send(&app.router, "GET", "/api/visit/logs", None).await;
        let logs: Vec<Value> = read_json(response).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(app.state.visit_service.list_visit_logs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_finish_without_start_is_bad_request() {
        let app = TestApp::new().await;
        send(&app.router, "POST", "/api/visit/plan", None).await;
        let response = send(&app.router, "POST", "/api/visit/finish", Some(json!({ "notes": null }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_task_is_not_found() {
        let app = TestApp::new().await;
        send(&app.router, "POST", "/api/visit/plan", None).await;
        let response = send(&app.router, "POST", "/api/visit/tasks/maintenance::42/complete", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
