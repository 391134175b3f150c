//! # REST API for Product Prices

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::UpsertProductRequest;

use crate::io::rest::error_response;
use crate::io::rest::mappers::finance_mapper::FinanceMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_prices))
        .route("/:product_id", put(upsert_product))
}

pub async fn get_prices(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/prices");

    match state.pricing_service.get_config().await {
        Ok(config) => (StatusCode::OK, Json(FinanceMapper::prices_to_dto(config))).into_response(),
        Err(e) => error_response("Failed to load prices", e),
    }
}

/// Create a product or change some of its fields; returns the full price list
pub async fn upsert_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<UpsertProductRequest>,
) -> impl IntoResponse {
    info!("PUT /api/prices/{} - request: {:?}", product_id, request);

    let command = FinanceMapper::to_upsert_command(product_id, request);
    match state.pricing_service.upsert_product(command).await {
        Ok(config) => (StatusCode::OK, Json(FinanceMapper::prices_to_dto(config))).into_response(),
        Err(e) => error_response("Failed to save product price", e),
    }
}
