//! Domain and wire models for the BFF
//!
//! The canonical character shape and the JSON envelope every endpoint returns.

pub mod character;
pub mod responses;

// Re-export commonly used types
pub use character::Character;
pub use responses::{ApiResponse, ErrorBody, HealthStatus, Pagination};
