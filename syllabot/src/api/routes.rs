use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .route(
            "/ingest/{course_id}",
            post(handlers::ingest::ingest_course).delete(handlers::ingest::reset_course),
        )
        .route("/chat", post(handlers::chat::chat))
        .route("/chat/reset", delete(handlers::chat::reset_chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
