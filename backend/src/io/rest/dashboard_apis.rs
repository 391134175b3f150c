//! # REST API for the Dashboard
//!
//! Read-only summaries derived from the other collections.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::dashboard_mapper::DashboardMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_overview))
        .route("/finance", get(get_finance))
}

pub async fn get_overview(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard");

    match state.dashboard_service.overview(Utc::now()).await {
        Ok(overview) => {
            (StatusCode::OK, Json(DashboardMapper::overview_to_dto(overview))).into_response()
        }
        Err(e) => error_response("Failed to build dashboard", e),
    }
}

pub async fn get_finance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/finance");

    match state.dashboard_service.finance().await {
        Ok(finance) => (StatusCode::OK, Json(DashboardMapper::finance_to_dto(finance))).into_response(),
        Err(e) => error_response("Failed to build finance summary", e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{read_json, send, TestApp};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_never_measured_station_is_critical() {
        let app = TestApp::new().await;
        let response = send(&app.router, "GET", "/api/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let overview: Value = read_json(response).await;
        assert_eq!(overview["status"], "critical");
        assert!(overview["days_since_last_measurement"].is_null());
        assert_eq!(overview["unread_alerts"], 0);
    }

    #[tokio::test]
    async fn test_fresh_reading_and_alert_mean_attention() {
        let app = TestApp::new().await;

        send(
            &app.router,
            "POST",
            "/api/quality/readings",
            Some(json!({
                "residual_chlorine": 0.0,
                "total_dissolved_solids": 100.0,
                "hardness": "none",
                "recorded_by": "Operator",
                "notes": null,
                "timestamp": null
            })),
        )
        .await;
        send(
            &app.router,
            "POST",
            "/api/notifications",
            Some(json!({ "kind": "alert", "title": "Low salt", "message": "", "action": null })),
        )
        .await;

        let response = send(&app.router, "GET", "/api/dashboard", None).await;
        let overview: Value = read_json(response).await;
        assert_eq!(overview["status"], "attention");
        assert_eq!(overview["days_since_last_measurement"], 0);
        assert_eq!(overview["latest_quality_status"], "optimal");
    }

    #[tokio::test]
    async fn test_finance_without_income_has_no_margin() {
        let app = TestApp::new().await;
        let response = send(&app.router, "GET", "/api/dashboard/finance", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let finance: Value = read_json(response).await;
        assert_eq!(finance["total_income"], 0.0);
        assert_eq!(finance["fixed_expenses"], 6000.0);
        assert!(finance["margin_percent"].is_null());
    }
}
