//! Route definitions
//!
//! All API routes mounted under /api/v1, with health probes outside the
//! versioned prefix.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, posts, reactions};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/reactions",
            post(reactions::toggle_reaction)
                .get(reactions::get_reaction_state)
                .delete(reactions::remove_reaction),
        )
}
