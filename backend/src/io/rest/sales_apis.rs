//! # REST API for Sales
//!
//! Daily unit counts, priced at the current product prices when recorded.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
    Router,
};
use log::info;
use shared::RecordSaleRequest;

use crate::io::rest::mappers::finance_mapper::FinanceMapper;
use crate::io::rest::{error_response, success_response};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(record_sale))
        .route("/:sale_id", delete(delete_sale))
}

pub async fn record_sale(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleRequest>,
) -> impl IntoResponse {
    info!("POST /api/sales - request: {:?}", request);

    let command = FinanceMapper::to_sale_command(request);
    match state.sales_service.record_sale(command).await {
        Ok(sale) => (StatusCode::CREATED, Json(FinanceMapper::sale_to_dto(sale))).into_response(),
        Err(e) => error_response("Failed to record sale", e),
    }
}

pub async fn list_sales(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales");

    match state.sales_service.list_sales().await {
        Ok(sales) => {
            let sales: Vec<_> = sales.into_iter().map(FinanceMapper::sale_to_dto).collect();
            (StatusCode::OK, Json(sales)).into_response()
        }
        Err(e) => error_response("Failed to list sales", e),
    }
}

pub async fn delete_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/sales/{}", sale_id);

    match state.sales_service.delete_sale(&sale_id).await {
        Ok(()) => success_response(format!("Sale {} deleted", sale_id)),
        Err(e) => error_response("Failed to delete sale", e),
    }
}
