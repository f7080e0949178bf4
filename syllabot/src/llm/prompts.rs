//! Prompt templates for the chat exchange.
//!
//! Templates use `format!()` interpolation; a missing variable is a compile
//! error rather than a runtime surprise.

use chrono::NaiveDate;

/// Fixed answer returned when retrieval produces nothing to work with. The
/// language model is not called and session memory is left untouched.
pub const NO_DATA_ANSWER: &str =
    "I couldn't find any indexed content for this course. Make sure the course has been ingested, then ask again.";

/// Build the system instruction for one chat exchange.
///
/// The context block arrives pre-prioritized: upcoming assignments first,
/// then announcements, then general material. The instruction pins the model
/// to that ordering for date questions and bakes in the current date so
/// "next week" style questions resolve correctly.
pub fn system_instruction(today: NaiveDate, context: &str) -> String {
    let date = today.format("%A, %B %-d, %Y");
    format!(
        r#"You are a professional course assistant for a student's Canvas course.
Today's date is {date}.

Use only the course context below to answer clearly and accurately.
Answer questions about assignments, deadlines, or what is due from the
UPCOMING ASSIGNMENTS section only; items elsewhere may be past due.
Be explicit about dates, and relate them to today's date when helpful.

If the user asks about grades or private information, politely say you
don't have access to that. Keep responses concise and factual.

Course context:
{context}"#
    )
}
