//! # REST API for Expenses
//!
//! Variable expenses recorded by day, and the monthly fixed obligations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, put},
    Router,
};
use log::info;
use shared::{CreateFixedExpenseRequest, RecordExpenseRequest, UpdateFixedExpenseRequest};

use crate::io::rest::mappers::finance_mapper::FinanceMapper;
use crate::io::rest::{error_response, success_response};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(record_expense))
        .route("/:expense_id", delete(delete_expense))
        .route("/fixed", get(list_fixed_expenses).post(create_fixed_expense))
        .route("/fixed/:expense_id", put(update_fixed_expense).delete(delete_fixed_expense))
}

pub async fn record_expense(
    State(state): State<AppState>,
    Json(request): Json<RecordExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let command = FinanceMapper::to_expense_command(request);
    match state.expense_service.record_expense(command).await {
        Ok(expense) => {
            (StatusCode::CREATED, Json(FinanceMapper::expense_to_dto(expense))).into_response()
        }
        Err(e) => error_response("Failed to record expense", e),
    }
}

pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list_expenses().await {
        Ok(expenses) => {
            let expenses: Vec<_> = expenses.into_iter().map(FinanceMapper::expense_to_dto).collect();
            (StatusCode::OK, Json(expenses)).into_response()
        }
        Err(e) => error_response("Failed to list expenses", e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    match state.expense_service.delete_expense(&expense_id).await {
        Ok(()) => success_response(format!("Expense {} deleted", expense_id)),
        Err(e) => error_response("Failed to delete expense", e),
    }
}

pub async fn list_fixed_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses/fixed");

    match state.expense_service.list_fixed_expenses().await {
        Ok(expenses) => {
            let expenses: Vec<_> = expenses
                .into_iter()
                .map(FinanceMapper::fixed_expense_to_dto)
                .collect();
            (StatusCode::OK, Json(expenses)).into_response()
        }
        Err(e) => error_response("Failed to list fixed expenses", e),
    }
}

pub async fn create_fixed_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateFixedExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses/fixed - request: {:?}", request);

    let command = FinanceMapper::to_create_fixed_command(request);
    match state.expense_service.create_fixed_expense(command).await {
        Ok(expense) => {
            (StatusCode::CREATED, Json(FinanceMapper::fixed_expense_to_dto(expense))).into_response()
        }
        Err(e) => error_response("Failed to create fixed expense", e),
    }
}

pub async fn update_fixed_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    Json(request): Json<UpdateFixedExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/fixed/{} - request: {:?}", expense_id, request);

    let command = FinanceMapper::to_update_fixed_command(request);
    match state
        .expense_service
        .update_fixed_expense(&expense_id, command)
        .await
    {
        Ok(expense) => {
            (StatusCode::OK, Json(FinanceMapper::fixed_expense_to_dto(expense))).into_response()
        }
        Err(e) => error_response("Failed to update fixed expense", e),
    }
}

pub async fn delete_fixed_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/fixed/{}", expense_id);

    match state.expense_service.delete_fixed_expense(&expense_id).await {
        Ok(()) => success_response(format!("Fixed expense {} deleted", expense_id)),
        Err(e) => error_response("Failed to delete fixed expense", e),
    }
}
