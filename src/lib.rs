//! Thrones BFF - Backend-for-frontend for the Thrones API
//!
//! Caches upstream character data and serves it filtered, sorted and
//! paginated behind a uniform JSON envelope.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
