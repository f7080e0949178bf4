mod client;
mod pagination;
mod records;

pub use client::CanvasClient;
pub use pagination::{fetch_all, next_link, PAGE_ITEM_CAP};
pub use records::{Announcement, Assignment, Course, Discussion, Enrollment, Person};
