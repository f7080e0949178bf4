//! Request/response shapes for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::processing::KindCounts;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Per-kind chunk counts reported by an ingestion run.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct IngestCounts {
    pub syllabus: usize,
    pub assignments: usize,
    pub announcements: usize,
    pub discussions: usize,
    pub staff: usize,
}

impl From<KindCounts> for IngestCounts {
    fn from(counts: KindCounts) -> Self {
        Self {
            syllabus: counts.syllabus,
            assignments: counts.assignments,
            announcements: counts.announcements,
            discussions: counts.discussions,
            staff: counts.staff,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct IngestResponse {
    pub status: String,
    pub course_name: String,
    pub chunk_count: usize,
    pub counts: IngestCounts,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub course_id: u64,
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ResetRequest {
    pub course_id: u64,
    pub session_id: String,
}
