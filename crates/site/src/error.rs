//! Contact endpoint errors with Sentry integration.
//!
//! Every failure of `POST /api/contact` becomes a [`ContactError`], which owns
//! the status code and the public `{"error": ...}` message. Internal detail
//! (parse errors, provider responses) is logged and sent to Sentry, never
//! returned to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use portfolio_core::{ErrorBody, Field};

use crate::services::{ProviderError, RenderError};

/// Body could not be parsed, or the handler failed unexpectedly.
pub const INVALID_REQUEST: &str = "Invalid request.";
/// A required field was empty.
pub const MISSING_FIELDS: &str = "Name, email, and message are required.";
/// No provider API key is configured.
pub const SERVICE_NOT_CONFIGURED: &str = "Email service is not configured.";
/// Sender or destination address is not configured.
pub const ADDRESSES_NOT_CONFIGURED: &str = "Contact email addresses are not configured.";
/// The provider rejected the email or did not answer.
pub const DELIVERY_FAILED: &str = "Failed to send email. Please try again.";

/// Errors returned by the contact submission handler.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Body was not valid JSON.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Required fields empty after trimming.
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// No email provider is configured.
    #[error("Email provider API key is not configured")]
    ServiceNotConfigured,

    /// Sender or destination address missing.
    #[error("Contact email addresses are not configured")]
    AddressesNotConfigured,

    /// Email template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] RenderError),

    /// Provider failed to deliver.
    #[error("Delivery error: {0}")]
    Delivery(#[from] ProviderError),
}

impl ContactError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingFields(_) | Self::Template(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceNotConfigured | Self::AddressesNotConfigured | Self::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) | Self::Template(_) => INVALID_REQUEST,
            Self::MissingFields(_) => MISSING_FIELDS,
            Self::ServiceNotConfigured => SERVICE_NOT_CONFIGURED,
            Self::AddressesNotConfigured => ADDRESSES_NOT_CONFIGURED,
            Self::Delivery(_) => DELIVERY_FAILED,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        match &self {
            // Operator-side failures go to Sentry
            Self::ServiceNotConfigured
            | Self::AddressesNotConfigured
            | Self::Template(_)
            | Self::Delivery(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Contact submission failed"
                );
            }
            Self::InvalidRequest(_) | Self::MissingFields(_) => {
                tracing::info!(error = %self, "Contact submission rejected");
            }
        }

        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

/// Response for a panic inside the contact handler.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer`.
pub fn panic_response(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Contact handler panicked");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new(INVALID_REQUEST)),
    )
        .into_response()
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for `ContactError`.
pub type Result<T> = std::result::Result<T, ContactError>;
