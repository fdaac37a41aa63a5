//! HTTP API layer

pub mod api;
pub mod config;
pub mod server;

pub use api::create_router;
pub use config::ApiConfig;
pub use server::{ApiServer, AppState, ServerError};
