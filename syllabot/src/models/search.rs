use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ChunkRecord, RecordKind};

/// Metadata stored alongside each vector and returned with every query match.
///
/// `kind` is optional on the read path: vectors written before the tagged-kind
/// field existed come back without it, and classification falls back to
/// parsing the text prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub course_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    #[serde(default)]
    pub position: i32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

impl From<&ChunkRecord> for ChunkMetadata {
    fn from(chunk: &ChunkRecord) -> Self {
        Self {
            course_id: chunk.course_id.to_string(),
            kind: Some(chunk.kind),
            position: chunk.position,
            text: chunk.text.clone(),
            due_date: chunk.due_date.clone(),
            points: chunk.points,
            sections: chunk.sections.clone(),
        }
    }
}

/// One ranked hit from a vector query. Ephemeral; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalMatch {
    pub id: String,
    pub score: f32,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCategory {
    UpcomingAssignment,
    Announcement,
    Other,
}

/// A retrieval match with its resolved kind, due date and category tag.
#[derive(Debug, Clone)]
pub struct ClassifiedMatch {
    pub matched: RetrievalMatch,
    pub kind: Option<RecordKind>,
    pub due_date: Option<NaiveDateTime>,
    pub category: MatchCategory,
}
