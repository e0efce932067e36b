pub mod api;
pub mod config;

pub use api::{router, AppState};
pub use config::ServerConfig;
