use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::canvas::{Announcement, Assignment, Course, Discussion, Person};
use crate::config::ProcessingConfig;
use crate::error::{Result, SyllabotError};
use crate::models::{ChunkRecord, RecordKind};

use super::chunker::Chunker;
use super::normalizer::normalize;

/// Exactly five consecutive digits: embedded section numbers in
/// announcement bodies.
fn section_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{5}\b").expect("valid section number regex"))
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KindCounts {
    pub syllabus: usize,
    pub assignments: usize,
    pub announcements: usize,
    pub discussions: usize,
    pub staff: usize,
}

#[derive(Debug)]
pub struct BuiltCourse {
    pub course_name: String,
    pub chunks: Vec<ChunkRecord>,
    pub counts: KindCounts,
}

/// Turns raw course records into tagged, self-describing chunk records.
///
/// Every chunk repeats the source record's stable metadata (title, due date,
/// points, posted date) in a leading summary segment, because retrieval may
/// surface any single chunk without its siblings. A record with an empty body
/// still yields exactly one chunk.
pub struct DocumentBuilder {
    chunker: Chunker,
}

impl DocumentBuilder {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            chunker: Chunker::new(config),
        }
    }

    pub fn build_course(
        &self,
        course: &Course,
        assignments: &[Assignment],
        announcements: &[Announcement],
        discussions: &[Discussion],
        staff: &[Person],
    ) -> Result<BuiltCourse> {
        let course_name = course
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Course".to_string());

        let mut chunks: Vec<ChunkRecord> = Vec::new();
        let mut counts = KindCounts::default();

        if let Some(syllabus) = course.syllabus_body.as_deref().filter(|s| !s.is_empty()) {
            counts.syllabus = self.push_syllabus(&mut chunks, course.id, &course_name, syllabus);
        }

        for assignment in assignments {
            counts.assignments += self.push_assignment(&mut chunks, course.id, assignment);
        }
        for announcement in announcements {
            counts.announcements += self.push_announcement(&mut chunks, course.id, announcement);
        }
        for discussion in discussions {
            counts.discussions += self.push_discussion(&mut chunks, course.id, discussion);
        }
        for person in staff {
            counts.staff += self.push_person(&mut chunks, course.id, person);
        }

        if chunks.is_empty() {
            return Err(SyllabotError::NoData("No course data found.".to_string()));
        }

        Ok(BuiltCourse {
            course_name,
            chunks,
            counts,
        })
    }

    fn push_syllabus(
        &self,
        chunks: &mut Vec<ChunkRecord>,
        course_id: u64,
        course_name: &str,
        body: &str,
    ) -> usize {
        let summary = format!("Syllabus for {course_name}");
        self.push_chunked(
            chunks,
            course_id,
            RecordKind::Syllabus,
            &summary,
            ": ",
            body,
            |_| {},
        )
    }

    fn push_assignment(
        &self,
        chunks: &mut Vec<ChunkRecord>,
        course_id: u64,
        assignment: &Assignment,
    ) -> usize {
        let name = assignment.name.as_deref().unwrap_or("Untitled");
        let mut summary = format!("Assignment: {name}");
        if let Some(due) = assignment.due_at.as_deref().filter(|d| !d.is_empty()) {
            summary.push_str(&format!(" | Due: {due}"));
        }
        let points = assignment.points_possible.filter(|p| *p > 0.0);
        if let Some(points) = points {
            summary.push_str(&format!(" | Points: {points}"));
        }

        let due_date = assignment.due_at.clone().filter(|d| !d.is_empty());
        let body = assignment.description.as_deref().unwrap_or("");
        self.push_chunked(
            chunks,
            course_id,
            RecordKind::Assignment,
            &summary,
            " | Description: ",
            body,
            |chunk| {
                chunk.due_date = due_date.clone();
                chunk.points = points;
            },
        )
    }

    fn push_announcement(
        &self,
        chunks: &mut Vec<ChunkRecord>,
        course_id: u64,
        announcement: &Announcement,
    ) -> usize {
        let title = announcement.title.as_deref().unwrap_or("Untitled");
        let mut summary = format!("Announcement: {title}");
        if let Some(posted) = announcement.posted_at.as_deref().filter(|p| !p.is_empty()) {
            summary.push_str(&format!(" | Date: {posted}"));
        }

        let body = announcement.message.as_deref().unwrap_or("");
        let sections = extract_section_numbers(&normalize(body));
        self.push_chunked(
            chunks,
            course_id,
            RecordKind::Announcement,
            &summary,
            " | Message: ",
            body,
            |chunk| chunk.sections = sections.clone(),
        )
    }

    fn push_discussion(
        &self,
        chunks: &mut Vec<ChunkRecord>,
        course_id: u64,
        discussion: &Discussion,
    ) -> usize {
        let title = discussion.title.as_deref().unwrap_or("Untitled");
        let summary = format!("Discussion: {title}");
        let body = discussion.message.as_deref().unwrap_or("");
        self.push_chunked(
            chunks,
            course_id,
            RecordKind::Discussion,
            &summary,
            " | Message: ",
            body,
            |_| {},
        )
    }

    fn push_person(&self, chunks: &mut Vec<ChunkRecord>, course_id: u64, person: &Person) -> usize {
        let name = person.name.as_deref().unwrap_or("Unknown");
        let text = format!("{}: {name} | Email: {}", person.role(), person.contact());
        let id = format!("{course_id}-{}", chunks.len());
        chunks.push(ChunkRecord::new(id, course_id, RecordKind::Person, 0, text));
        1
    }

    /// Normalize and chunk `body`, emitting one record per fragment. The
    /// summary segment is repeated on every fragment; a record whose body
    /// normalizes to nothing still emits one summary-only chunk.
    #[allow(clippy::too_many_arguments)]
    fn push_chunked<F>(
        &self,
        chunks: &mut Vec<ChunkRecord>,
        course_id: u64,
        kind: RecordKind,
        summary: &str,
        body_separator: &str,
        body: &str,
        decorate: F,
    ) -> usize
    where
        F: Fn(&mut ChunkRecord),
    {
        let normalized = normalize(body);
        let fragments = self.chunker.chunk(&normalized);

        let mut emitted = 0;
        for (position, fragment) in fragments.iter().enumerate() {
            let text = if fragment.is_empty() {
                summary.to_string()
            } else {
                format!("{summary}{body_separator}{fragment}")
            };

            let id = format!("{course_id}-{}", chunks.len());
            let mut chunk = ChunkRecord::new(id, course_id, kind, position as i32, text);
            decorate(&mut chunk);
            chunks.push(chunk);
            emitted += 1;
        }

        emitted
    }
}

fn extract_section_numbers(text: &str) -> Vec<String> {
    let mut sections: Vec<String> = Vec::new();
    for m in section_number_re().find_iter(text) {
        let number = m.as_str().to_string();
        if !sections.contains(&number) {
            sections.push(number);
        }
    }
    sections
}
