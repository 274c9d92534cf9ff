//! Render a contact email locally.
//!
//! Builds the outbound email through the same path as `POST /api/contact`
//! (coercion, trimming, required check, template), then logs the subject and
//! HTML body instead of sending.

use portfolio_core::ContactSubmission;
use portfolio_site::services::{ContactAddresses, OutboundEmail, RenderError, contact_email};
use thiserror::Error;

use super::SubmissionArgs;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] RenderError),
}

/// Render the email the server would send for `submission`.
///
/// # Errors
///
/// Returns an error if a required field is empty or the template fails.
pub fn render(
    submission: SubmissionArgs,
    from: String,
    to: String,
) -> Result<OutboundEmail, PreviewError> {
    let raw = serde_json::to_value(submission.into_submission())?;
    let submission = ContactSubmission::from_json(&raw);

    let missing = submission.missing_required();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        return Err(PreviewError::MissingFields(names.join(", ")));
    }

    Ok(contact_email(&submission, &ContactAddresses { from, to })?)
}

/// Render and log the email.
pub fn run(submission: SubmissionArgs, from: String, to: String) -> Result<(), PreviewError> {
    let email = render(submission, from, to)?;

    tracing::info!(from = %email.from, to = %email.to, reply_to = %email.reply_to, "Subject: {}", email.subject);
    tracing::info!("{}", email.html);
    Ok(())
}
