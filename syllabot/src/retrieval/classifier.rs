use chrono::NaiveDate;

use crate::models::{ClassifiedMatch, MatchCategory, RecordKind, RetrievalMatch};

use super::dates::{parse_due_date, parse_timestamp};

/// Classify one retrieval match relative to `today`.
///
/// The stored `kind` metadata tag is trusted when present; the text prefix is
/// parsed only as a fallback for vectors written without the tag. An
/// assignment is upcoming only when a due date resolves and is on or after
/// `today`; announcements keep a resolved due date if one happens to parse.
pub fn classify(matched: RetrievalMatch, today: NaiveDate) -> ClassifiedMatch {
    let kind = matched
        .metadata
        .kind
        .or_else(|| kind_from_prefix(&matched.metadata.text));

    let due_date = matched
        .metadata
        .due_date
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| parse_due_date(&matched.metadata.text));

    let category = match kind {
        Some(RecordKind::Assignment)
            if due_date.map(|due| due.date() >= today).unwrap_or(false) =>
        {
            MatchCategory::UpcomingAssignment
        }
        Some(RecordKind::Announcement) => MatchCategory::Announcement,
        _ => MatchCategory::Other,
    };

    ClassifiedMatch {
        matched,
        kind,
        due_date,
        category,
    }
}

fn kind_from_prefix(text: &str) -> Option<RecordKind> {
    if text.starts_with("Assignment:") {
        Some(RecordKind::Assignment)
    } else if text.starts_with("Announcement:") {
        Some(RecordKind::Announcement)
    } else {
        None
    }
}
