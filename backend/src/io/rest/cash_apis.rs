//! # REST API for the Cash Drawer
//!
//! Expected cash since the last count, and recording a new count.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use log::info;
use shared::RecordReconciliationRequest;

use crate::domain::commands::cash::RecordReconciliationCommand;
use crate::io::rest::error_response;
use crate::io::rest::mappers::finance_mapper::FinanceMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expected", get(get_expected_cash))
        .route("/reconciliations", get(list_reconciliations).post(record_reconciliation))
}

pub async fn get_expected_cash(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/cash/expected");

    match state.cash_ledger.compute_expected_cash().await {
        Ok(expected) => {
            (StatusCode::OK, Json(FinanceMapper::expected_cash_to_dto(expected))).into_response()
        }
        Err(e) => error_response("Failed to compute expected cash", e),
    }
}

pub async fn record_reconciliation(
    State(state): State<AppState>,
    Json(request): Json<RecordReconciliationRequest>,
) -> impl IntoResponse {
    info!("POST /api/cash/reconciliations - request: {:?}", request);

    let command = RecordReconciliationCommand {
        withdrawn_amount: request.withdrawn_amount,
        notes: request.notes,
    };
    match state.cash_ledger.record_reconciliation(command, Utc::now()).await {
        Ok(entry) => {
            (StatusCode::CREATED, Json(FinanceMapper::reconciliation_to_dto(entry))).into_response()
        }
        Err(e) => error_response("Failed to record cash count", e),
    }
}

pub async fn list_reconciliations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/cash/reconciliations");

    match state.cash_ledger.list_reconciliations().await {
        Ok(entries) => {
            let entries: Vec<_> = entries
                .into_iter()
                .map(FinanceMapper::reconciliation_to_dto)
                .collect();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(e) => error_response("Failed to list cash counts", e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{read_json, send, TestApp};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_count_closes_the_drawer() {
        let app = TestApp::new().await;

        // 10 large at 30, 10 small at 18, 10 litres at 2
        send(
            &app.router,
            "POST",
            "/api/sales",
            Some(json!({ "date": "2025-06-10", "large": 10, "small": 10, "by_volume": 10 })),
        )
        .await;
        send(
            &app.router,
            "POST",
            "/api/expenses",
            Some(json!({
                "date": "2025-06-11",
                "concept": "Salt",
                "amount": 120.0,
                "category": "supplies",
                "notes": null
            })),
        )
        .await;

        let response = send(&app.router, "GET", "/api/cash/expected", None).await;
        let expected: Value = read_json(response).await;
        assert_eq!(expected["sales_since"], 500.0);
        assert_eq!(expected["expected_cash"], 380.0);
        assert!(expected["checkpoint"].is_null());

        let response = send(
            &app.router,
            "POST",
            "/api/cash/reconciliations",
            Some(json!({ "withdrawn_amount": 300.0, "notes": "bank deposit" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let entry: Value = read_json(response).await;
        assert_eq!(entry["closing_cash"], 80.0);

        let response = send(&app.router, "GET", "/api/cash/expected", None).await;
        let expected: Value = read_json(response).await;
        assert_eq!(expected["opening_cash"], 80.0);
        assert_eq!(expected["sales_since"], 0.0);
        assert_eq!(expected["expected_cash"], 80.0);

        let response = send(&app.router, "GET", "/api/cash/reconciliations", None).await;
        let history: Vec<Value> = read_json(response).await;
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_withdrawal_is_rejected() {
        let app = TestApp::new().await;
        let response = send(
            &app.router,
            "POST",
            "/api/cash/reconciliations",
            Some(json!({ "withdrawn_amount": -5.0, "notes": null })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
