use serde::{Deserialize, Serialize};

/// Source record kind a chunk was built from.
///
/// Carried as explicit metadata from the document builder through the vector
/// store and back, so retrieval-time classification does not have to re-parse
/// the chunk text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Syllabus,
    Assignment,
    Announcement,
    Discussion,
    Person,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Syllabus => "syllabus",
            RecordKind::Assignment => "assignment",
            RecordKind::Announcement => "announcement",
            RecordKind::Discussion => "discussion",
            RecordKind::Person => "person",
        }
    }
}

/// One embeddable text unit derived from a single course record.
///
/// `id` follows `"{course_id}-{running_counter}"` and is stable only within
/// one ingestion run; re-ingestion clears the course namespace and rebuilds.
/// Chunks from the same source record share all non-text fields and are
/// ordered by `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub course_id: u64,
    pub kind: RecordKind,
    pub position: i32,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

impl ChunkRecord {
    pub fn new(id: String, course_id: u64, kind: RecordKind, position: i32, text: String) -> Self {
        Self {
            id,
            course_id,
            kind,
            position,
            text,
            due_date: None,
            points: None,
            sections: Vec::new(),
        }
    }
}
