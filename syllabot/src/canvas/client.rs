use std::time::Duration;

use crate::config::CanvasConfig;
use crate::error::{Result, SyllabotError};

use super::pagination::fetch_all;
use super::records::{Announcement, Assignment, Course, Discussion, Person};

/// Client for the Canvas-style course record service.
///
/// All collection endpoints are drained through the paginated fetcher; the
/// single-resource course fetch is a plain GET.
#[derive(Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CanvasClient {
    pub fn new(config: &CanvasConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyllabotError::Fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.access_token.clone(),
        })
    }

    pub async fn fetch_course(&self, course_id: u64) -> Result<Course> {
        let url = format!("{}/api/v1/courses/{course_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("include[]", "syllabus_body")])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SyllabotError::Fetch(format!("Course fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyllabotError::Fetch(format!(
                "Course {course_id} fetch returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SyllabotError::Fetch(format!("Invalid course payload: {e}")))
    }

    pub async fn list_assignments(&self, course_id: u64) -> Result<Vec<Assignment>> {
        let url = format!("{}/api/v1/courses/{course_id}/assignments", self.base_url);
        fetch_all(&self.http, &self.token, &url, &[("per_page", "100")]).await
    }

    pub async fn list_announcements(&self, course_id: u64) -> Result<Vec<Announcement>> {
        let url = format!("{}/api/v1/announcements", self.base_url);
        let context = format!("course_{course_id}");
        fetch_all(
            &self.http,
            &self.token,
            &url,
            &[("context_codes[]", context.as_str()), ("per_page", "50")],
        )
        .await
    }

    pub async fn list_discussions(&self, course_id: u64) -> Result<Vec<Discussion>> {
        let url = format!(
            "{}/api/v1/courses/{course_id}/discussion_topics",
            self.base_url
        );
        fetch_all(&self.http, &self.token, &url, &[("per_page", "50")]).await
    }

    /// Instructors and TAs only; students are never ingested.
    pub async fn list_staff(&self, course_id: u64) -> Result<Vec<Person>> {
        let url = format!("{}/api/v1/courses/{course_id}/users", self.base_url);
        fetch_all(
            &self.http,
            &self.token,
            &url,
            &[
                ("enrollment_type[]", "teacher"),
                ("enrollment_type[]", "ta"),
                ("per_page", "50"),
            ],
        )
        .await
    }
}
