//! Ingestion handlers: build (or rebuild) a course's vector namespace, and
//! clear it.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{IngestResponse, StatusResponse};
use crate::api::state::AppState;
use crate::error::Result;

/// `POST /ingest/{course_id}`
///
/// Runs the full ingestion pipeline for one course. Re-running clears the
/// course namespace and rebuilds it from scratch.
#[utoipa::path(
    post,
    path = "/ingest/{course_id}",
    tag = "ingest",
    params(
        ("course_id" = u64, Path, description = "Course identifier in the record service"),
    ),
    responses(
        (status = 200, description = "Course ingested", body = IngestResponse),
        (status = 404, description = "Course has no ingestable records"),
        (status = 502, description = "A collaborator call failed"),
    )
)]
pub async fn ingest_course(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
) -> Result<Json<IngestResponse>> {
    let outcome = state.ingestion.ingest_course(course_id).await?;

    Ok(Json(IngestResponse {
        status: "ok".to_string(),
        course_name: outcome.course_name,
        chunk_count: outcome.chunk_count,
        counts: outcome.counts.into(),
    }))
}

/// `DELETE /ingest/{course_id}`
#[utoipa::path(
    delete,
    path = "/ingest/{course_id}",
    tag = "ingest",
    params(
        ("course_id" = u64, Path, description = "Course identifier in the record service"),
    ),
    responses(
        (status = 200, description = "Course namespace cleared", body = StatusResponse),
    )
)]
pub async fn reset_course(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
) -> Result<Json<StatusResponse>> {
    state.ingestion.reset_course(course_id).await?;
    Ok(Json(StatusResponse::ok()))
}
