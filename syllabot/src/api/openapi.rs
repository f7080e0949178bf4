use axum::Json;
use utoipa::OpenApi;

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Syllabot API",
        version = "1.0.0",
        description = "Self-hostable AI course assistant. Ingests a Canvas-style course into a vector index and answers questions over it.",
    ),
    paths(
        handlers::health::health_check,
        handlers::ingest::ingest_course,
        handlers::ingest::reset_course,
        handlers::chat::chat,
        handlers::chat::reset_chat,
    ),
    components(schemas(
        dto::StatusResponse,
        dto::IngestCounts,
        dto::IngestResponse,
        dto::ChatRequest,
        dto::ChatResponse,
        dto::ResetRequest,
        handlers::health::HealthData,
        handlers::health::EmbeddingsStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "ingest", description = "Course ingestion and namespace reset"),
        (name = "chat", description = "Question answering and session memory"),
    )
)]
pub struct ApiDoc;

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
