//! # REST API for Notifications

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::info;
use shared::CreateNotificationRequest;

use crate::io::rest::error_response;
use crate::io::rest::mappers::notification_mapper::NotificationMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(add_notification))
        .route("/:notification_id/read", post(mark_read))
}

pub async fn add_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> impl IntoResponse {
    info!("POST /api/notifications - request: {:?}", request);

    let command = NotificationMapper::to_command(request);
    match state
        .notification_service
        .add_notification(command, Utc::now())
        .await
    {
        Ok(notification) => {
            (StatusCode::CREATED, Json(NotificationMapper::to_dto(notification))).into_response()
        }
        Err(e) => error_response("Failed to add notification", e),
    }
}

pub async fn list_notifications(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/notifications");

    match state.notification_service.list_notifications().await {
        Ok(notifications) => {
            let notifications: Vec<_> = notifications
                .into_iter()
                .map(NotificationMapper::to_dto)
                .collect();
            (StatusCode::OK, Json(notifications)).into_response()
        }
        Err(e) => error_response("Failed to list notifications", e),
    }
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/notifications/{}/read", notification_id);

    match state.notification_service.mark_read(&notification_id).await {
        Ok(notification) => {
            (StatusCode::OK, Json(NotificationMapper::to_dto(notification))).into_response()
        }
        Err(e) => error_response("Failed to mark notification read", e),
    }
}
