//! API Routes
//!
//! Configures the Axum router with all BFF endpoints.

use axum::{routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_character_handler, health_handler, list_characters_handler, not_found_handler, AppState,
};
use crate::error::panic_response;

/// Path prefix shared by every endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Panic recovery: a panicking handler yields a 500 JSON envelope
/// - CORS: allows any origin, method and header
/// - Tracing: logs all requests
///
/// `/characters/` with a trailing slash also serves the list. Unknown paths
/// fall through to a JSON 404.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/characters", get(list_characters_handler))
        .route("/characters/", get(list_characters_handler))
        .route("/characters/:id", get(get_character_handler));

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
