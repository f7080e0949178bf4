mod store;

pub use store::{InMemorySessionStore, SessionStore};
