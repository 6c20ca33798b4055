//! Detoxify API Module
//! Thin HTTP transport in front of the analysis pipeline

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
