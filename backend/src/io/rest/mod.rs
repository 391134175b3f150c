//! # REST API Interface Layer
//!
//! HTTP endpoints for the station backend, mounted under `/api`.
//! This layer handles:
//! - JSON request/response serialization
//! - Mapping `shared` DTOs to domain commands and back
//! - Translating domain errors to HTTP status codes
//!
//! | Domain error | Status |
//! |--------------|--------|
//! | Validation   | 400    |
//! | NotFound     | 404    |
//! | Store        | 500    |

pub mod cash_apis;
pub mod dashboard_apis;
pub mod expense_apis;
pub mod maintenance_apis;
pub mod mappers;
pub mod notification_apis;
pub mod price_apis;
pub mod quality_apis;
pub mod sales_apis;
pub mod visit_apis;

#[cfg(test)]
mod test_support;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use log::{error, warn};
use shared::{ErrorResponse, SuccessResponse};

use crate::domain::DomainError;
use crate::AppState;

/// All API routes, relative to `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/quality", quality_apis::router())
        .nest("/maintenance", maintenance_apis::router())
        .nest("/visit", visit_apis::router())
        .nest("/sales", sales_apis::router())
        .nest("/expenses", expense_apis::router())
        .nest("/cash", cash_apis::router())
        .nest("/prices", price_apis::router())
        .nest("/notifications", notification_apis::router())
        .nest("/dashboard", dashboard_apis::router())
}

/// Convert a domain failure into a JSON error response
pub fn error_response(context: &str, err: DomainError) -> Response {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("{}: {}", context, err);
    } else {
        warn!("{}: {}", context, err);
    }
    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

pub fn success_response(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(SuccessResponse {
            success_message: message.into(),
        }),
    )
        .into_response()
}
