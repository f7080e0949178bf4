pub mod dto;
pub mod handlers;
mod openapi;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
