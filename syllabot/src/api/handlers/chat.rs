//! Chat handlers: one question/answer exchange, and session reset.

use axum::extract::State;
use axum::Json;

use crate::api::dto::{ChatRequest, ChatResponse, ResetRequest, StatusResponse};
use crate::api::state::AppState;
use crate::error::Result;

/// `POST /chat`
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer to the question", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 502, description = "A collaborator call failed"),
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let answer = state
        .chat
        .chat(request.course_id, &request.session_id, &request.message)
        .await?;

    Ok(Json(ChatResponse { answer }))
}

/// `DELETE /chat/reset`
#[utoipa::path(
    delete,
    path = "/chat/reset",
    tag = "chat",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Session memory cleared", body = StatusResponse),
    )
)]
pub async fn reset_chat(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<StatusResponse>> {
    state
        .chat
        .reset(request.course_id, &request.session_id)
        .await?;

    Ok(Json(StatusResponse::ok()))
}
