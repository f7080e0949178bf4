mod classifier;
mod context;
mod dates;

pub use classifier::classify;
pub use context::{assemble, ContextBlock, ANNOUNCEMENT_LIMIT, OTHER_LIMIT};
pub use dates::{parse_due_date, parse_timestamp};
