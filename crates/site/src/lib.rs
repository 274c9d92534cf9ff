//! Portfolio site library.
//!
//! Serves the pre-built front-end bundle and relays contact form
//! submissions to the site owner through a transactional email provider.
//! The router is exposed as [`app`] so tests and the integration harness can
//! drive it without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, http::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the full application router.
///
/// API and health routes take precedence; every other path is served from
/// the configured static directory.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    routes::routes()
        .fallback_service(ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
