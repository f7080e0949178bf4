use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{ClassifiedMatch, MatchCategory, RecordKind, RetrievalMatch};

use super::classifier::classify;

/// Announcements kept in the context block, by relevance.
pub const ANNOUNCEMENT_LIMIT: usize = 5;
/// General-material chunks kept in the context block, by relevance.
pub const OTHER_LIMIT: usize = 3;

const UPCOMING_HEADER: &str = "UPCOMING ASSIGNMENTS:";
const ANNOUNCEMENTS_HEADER: &str = "RECENT ANNOUNCEMENTS:";
const OTHER_HEADER: &str = "OTHER COURSE MATERIALS:";

/// The assembled, prioritized text handed to the language model.
#[derive(Debug, Clone)]
pub struct ContextBlock {
    pub text: String,
    pub is_empty: bool,
}

impl ContextBlock {
    fn empty() -> Self {
        Self {
            text: String::new(),
            is_empty: true,
        }
    }
}

/// Build the context block from one query's ranked matches.
///
/// Section order encodes the priority policy: every upcoming assignment
/// first (uncapped), then the top announcements, then general material.
/// If all sections filter to nothing (e.g. only past-due assignments
/// matched), the raw match texts are used verbatim rather than answering
/// from nothing.
pub fn assemble(matches: Vec<RetrievalMatch>, today: NaiveDate) -> ContextBlock {
    if matches.is_empty() {
        return ContextBlock::empty();
    }

    let raw_texts: Vec<String> = matches
        .iter()
        .map(|m| m.metadata.text.clone())
        .collect();

    let classified: Vec<ClassifiedMatch> = matches
        .into_iter()
        .map(|m| classify(m, today))
        .collect();

    let mut upcoming: Vec<&ClassifiedMatch> = classified
        .iter()
        .filter(|c| c.category == MatchCategory::UpcomingAssignment)
        .collect();
    upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date));

    let mut announcements: Vec<&ClassifiedMatch> = classified
        .iter()
        .filter(|c| c.category == MatchCategory::Announcement)
        .collect();
    sort_by_score_desc(&mut announcements);
    announcements.truncate(ANNOUNCEMENT_LIMIT);

    // Assignments never land in the general-material section: they are
    // either upcoming, or (past-due / undated) left for the raw fallback.
    let mut other: Vec<&ClassifiedMatch> = classified
        .iter()
        .filter(|c| {
            c.category == MatchCategory::Other && c.kind != Some(RecordKind::Assignment)
        })
        .collect();
    sort_by_score_desc(&mut other);
    other.truncate(OTHER_LIMIT);

    let mut sections: Vec<String> = Vec::new();
    if let Some(section) = render_section(UPCOMING_HEADER, &upcoming) {
        sections.push(section);
    }
    if let Some(section) = render_section(ANNOUNCEMENTS_HEADER, &announcements) {
        sections.push(section);
    }
    if let Some(section) = render_section(OTHER_HEADER, &other) {
        sections.push(section);
    }

    if !sections.is_empty() {
        return ContextBlock {
            text: sections.join("\n\n"),
            is_empty: false,
        };
    }

    // Nothing survived filtering; fall back to the raw match texts.
    let fallback = raw_texts
        .iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n");

    if fallback.is_empty() {
        ContextBlock::empty()
    } else {
        ContextBlock {
            text: fallback,
            is_empty: false,
        }
    }
}

fn sort_by_score_desc(matches: &mut [&ClassifiedMatch]) {
    matches.sort_by(|a, b| {
        b.matched
            .score
            .partial_cmp(&a.matched.score)
            .unwrap_or(Ordering::Equal)
    });
}

fn render_section(header: &str, members: &[&ClassifiedMatch]) -> Option<String> {
    if members.is_empty() {
        return None;
    }

    let mut section = String::from(header);
    for member in members {
        section.push('\n');
        section.push_str(&member.matched.metadata.text);
    }
    Some(section)
}
