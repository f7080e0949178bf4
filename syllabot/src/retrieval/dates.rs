use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

fn iso_due_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Due:\s*(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:?\d{2})?)")
            .expect("valid ISO due regex")
    })
}

fn human_due_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:Due Date|Due|Deadline|Submit by):\s*([A-Za-z]+\s+\d{1,2},?\s+\d{4})")
            .expect("valid human due regex")
    })
}

/// Parse a bare ISO-8601 timestamp, normalizing to UTC and dropping the
/// offset. Timestamps without an offset are taken as already naive.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Extract a due date from free text.
///
/// Tries, in order: an ISO-8601 timestamp after a `Due:` marker, then the
/// human-readable `Due: / Due Date: / Deadline: / Submit by: Month DD, YYYY`
/// patterns (full or abbreviated month). A pattern that matches but fails to
/// parse is skipped silently. Never errors; "no date" is simply `None`.
pub fn parse_due_date(text: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = iso_due_re().captures(text) {
        if let Some(parsed) = parse_timestamp(&caps[1]) {
            return Some(parsed);
        }
    }

    if let Some(caps) = human_due_re().captures(text) {
        let raw = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        for format in ["%B %d, %Y", "%B %d %Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(&raw, format) {
                return date.and_hms_opt(0, 0, 0);
            }
        }
        tracing::debug!("due-date pattern matched but did not parse: {raw}");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn iso_timestamp_after_due_marker() {
        let parsed = parse_due_date("Assignment: HW | Due: 2025-12-06T06:59:59Z | Points: 10")
            .expect("parses");
        assert_eq!(parsed.date(), date(2025, 12, 6));
    }

    #[test]
    fn iso_offset_is_normalized_to_utc_then_dropped() {
        let parsed = parse_due_date("Due: 2025-12-06T23:59:59-07:00").expect("parses");
        assert_eq!(parsed.date(), date(2025, 12, 7));
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "06:59:59");
    }

    #[test]
    fn full_month_deadline() {
        let parsed = parse_due_date("Deadline: March 3, 2026").expect("parses");
        assert_eq!(parsed.date(), date(2026, 3, 3));
    }

    #[test]
    fn abbreviated_month_submit_by() {
        let parsed = parse_due_date("Submit by: Mar 3, 2026").expect("parses");
        assert_eq!(parsed.date(), date(2026, 3, 3));
    }

    #[test]
    fn due_date_variant_without_comma() {
        let parsed = parse_due_date("Due Date: January 15 2026").expect("parses");
        assert_eq!(parsed.date(), date(2026, 1, 15));
    }

    #[test]
    fn no_date_yields_none() {
        assert!(parse_due_date("no date here").is_none());
        assert!(parse_due_date("").is_none());
    }

    #[test]
    fn unparseable_match_is_skipped_silently() {
        // Matches the human pattern but is not a real date.
        assert!(parse_due_date("Due: Franuary 99, 2026").is_none());
    }

    #[test]
    fn iso_without_offset_is_taken_naive() {
        let parsed = parse_due_date("Due: 2025-10-01T12:00:00").expect("parses");
        assert_eq!(parsed.date(), date(2025, 10, 1));
    }

    #[test]
    fn parse_timestamp_direct() {
        let parsed = parse_timestamp("2025-12-06T06:59:59Z").expect("parses");
        assert_eq!(parsed.date(), date(2025, 12, 6));
        assert!(parse_timestamp("yesterday").is_none());
    }
}
