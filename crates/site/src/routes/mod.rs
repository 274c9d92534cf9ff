//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! POST /api/contact            - Relay a contact form submission by email
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (contact relay configured)
//! GET  /*                      - Static front-end bundle (fallback, see `app`)
//! ```

pub mod contact;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::panic_response;
use crate::state::AppState;

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/contact",
        post(contact::submit).layer(CatchPanicLayer::custom(panic_response)),
    )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
