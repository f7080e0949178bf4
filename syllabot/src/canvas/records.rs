//! Wire shapes of the Canvas-style course record API.
//!
//! Every content field is optional: the upstream API omits fields freely and
//! ingestion treats missing bodies as empty rather than failing a whole run.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: Option<String>,
    pub syllabus_body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// ISO-8601 timestamp, e.g. `2025-12-06T06:59:59Z`.
    pub due_at: Option<String>,
    pub points_possible: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Announcement {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub posted_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Discussion {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub name: Option<String>,
    pub login_id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Person {
    /// Role label for the summary line; the first enrollment wins.
    pub fn role(&self) -> &str {
        self.enrollments
            .first()
            .and_then(|e| e.kind.as_deref())
            .unwrap_or("Staff")
    }

    /// Contact identifier: explicit email when present, login id otherwise.
    pub fn contact(&self) -> &str {
        self.email
            .as_deref()
            .or(self.login_id.as_deref())
            .unwrap_or("")
    }
}
