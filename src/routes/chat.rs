use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value as JsonValue;
use tracing::info;

use crate::{
    AppState, handlers,
    models::{chat::ChatRequest, common::ErrorMessage},
};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Upstream JSON body, passed through unchanged. With status forwarding on, the upstream status code is used instead of 200."),
        (status = 400, description = "Bad Request - body has no text `query`", body = ErrorMessage),
        (status = 502, description = "Upstream unreachable or answered with non-JSON", body = ErrorMessage),
        (status = 504, description = "Upstream timed out", body = ErrorMessage)
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<JsonValue>,
) -> Result<Response, (StatusCode, Json<ErrorMessage>)> {
    // Reject before anything goes upstream
    let req: ChatRequest = serde_json::from_value(payload).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorMessage::new(format!("Invalid chat payload: {err}"))),
        )
    })?;

    info!("Incoming chat query ({} chars)", req.query.chars().count());

    let reply = handlers::chat::relay(&state, &req).await.map_err(|e| {
        (e.status_code(), Json(ErrorMessage::new(e.public_message())))
    })?;

    let status = if state.cfg.forward_upstream_status {
        reply.status
    } else {
        StatusCode::OK
    };

    Ok((status, Json(reply.body)).into_response())
}
