//! API Module
//!
//! HTTP handlers and routing for the BFF REST API.
//!
//! # Endpoints
//! - `GET /api/v1/characters` - Filtered, sorted, optionally paginated list
//! - `GET /api/v1/characters/:id` - Single character
//! - `GET /api/v1/health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, API_PREFIX};
