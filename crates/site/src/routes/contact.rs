//! Contact form route handlers.
//!
//! Validates a submission, renders it into an HTML email and relays it
//! through the configured provider. One provider attempt per request.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde_json::Value;
use tracing::instrument;

use portfolio_core::{ContactAccepted, ContactSubmission};

use crate::error::{ContactError, Result};
use crate::services::{ProviderError, contact_email};
use crate::state::AppState;

/// Relay a contact form submission.
///
/// POST /api/contact
///
/// The raw body is parsed as JSON whatever its content type. A body that
/// cannot be read (over the size limit, broken stream) or parsed yields
/// `Invalid request.`.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<ContactAccepted>> {
    let body = body.map_err(|e| ContactError::InvalidRequest(e.body_text()))?;
    tracing::debug!(body_len = body.len(), "Contact submission received");

    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ContactError::InvalidRequest(e.to_string()))?;

    let submission = ContactSubmission::from_json(&value);

    let missing = submission.missing_required();
    if !missing.is_empty() {
        return Err(ContactError::MissingFields(missing));
    }

    let mailer = state.mailer().ok_or(ContactError::ServiceNotConfigured)?;
    let addresses = state
        .contact_addresses()
        .ok_or(ContactError::AddressesNotConfigured)?;

    let email = contact_email(&submission, &addresses)?;

    let timeout = state.send_timeout();
    let sent = tokio::time::timeout(timeout, mailer.send(&email))
        .await
        .map_err(|_| ProviderError::Timeout(timeout))??;

    tracing::info!(
        provider = mailer.provider_name(),
        id = ?sent.id,
        reply_to = %submission.email,
        "Contact message relayed"
    );

    Ok(Json(ContactAccepted::new(sent.id)))
}
