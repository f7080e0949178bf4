use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllabotError {
    #[error("Course fetch error: {0}")]
    Fetch(String),

    #[error("No course data: {0}")]
    NoData(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index write error: {0}")]
    IndexWrite(String),

    #[error("Index query error: {0}")]
    IndexQuery(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for SyllabotError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SyllabotError::NoData(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            SyllabotError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            SyllabotError::Fetch(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            SyllabotError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            SyllabotError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            SyllabotError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            SyllabotError::Embedding(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            SyllabotError::IndexWrite(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            SyllabotError::IndexQuery(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            SyllabotError::Session(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            SyllabotError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SyllabotError>;
