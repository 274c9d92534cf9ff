//! Request ID middleware for log and error correlation.
//!
//! Every response carries an `x-request-id`. An upstream id is kept only when
//! it is short and made of token characters; anything else is replaced by a
//! fresh UUID v4 so arbitrary client input never reaches logs or Sentry tags.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id that is accepted as-is.
pub const MAX_REQUEST_ID_LEN: usize = 64;

/// Middleware that ensures every request has a usable request ID.
///
/// The chosen id is written back onto the request, recorded on the
/// `request_id` span field, tagged on the Sentry scope and echoed on the
/// response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    let value = request
        .headers()
        .get(&header)
        .filter(|v| is_acceptable(v.as_bytes()))
        .cloned()
        .unwrap_or_else(generate);

    request.headers_mut().insert(header.clone(), value.clone());

    if let Ok(id) = value.to_str() {
        Span::current().record("request_id", id);
        sentry::configure_scope(|scope| scope.set_tag("request_id", id));
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(header, value);
    response
}

fn is_acceptable(id: &[u8]) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

fn generate() -> HeaderValue {
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}
