//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::MessageText,
    infrastructure::dto::http::{SendMessageRequest, ServiceInfoDto, StatusResponse},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Broadcast a chat message submitted over plain HTTP
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, (StatusCode, &'static str)> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected /send request: {}", e);
        (StatusCode::BAD_REQUEST, "Invalid JSON")
    })?;

    let text = MessageText::new(request.message)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Missing 'message' or 'from'"))?;

    match state
        .send_message_usecase
        .execute(&request.from, text)
        .await
    {
        Ok(_report) => Ok(Json(StatusResponse::ok())),
        Err(crate::usecase::SendMessageError::EmptySender) => {
            Err((StatusCode::BAD_REQUEST, "Missing 'message' or 'from'"))
        }
        Err(e) => {
            tracing::error!("Failed to send message: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}

/// Service information: version, start time, uptime and online users
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoDto> {
    let info = state.get_service_info_usecase.execute().await;
    Json(info.into())
}
