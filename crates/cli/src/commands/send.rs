//! Submit a contact message through the form client.
//!
//! Exits non-zero unless the site accepted the message.

use std::time::Duration;

use portfolio_client::{ContactFormClient, HttpTransport, SubmitOutcome, TransportError};
use thiserror::Error;

use super::SubmissionArgs;

/// Errors that can occur while sending.
#[derive(Debug, Error)]
pub enum SendError {
    /// The transport could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A required field is empty.
    #[error("Name, email, and message are required (pass --skip-local-check to send anyway)")]
    Incomplete,

    /// Another submission was already in flight.
    #[error("A submission is already in progress")]
    InFlight,

    /// The site did not accept the message.
    #[error("{0}")]
    NotDelivered(String),
}

/// Fill the form, apply the local check and submit once.
pub async fn run(
    url: &str,
    submission: SubmissionArgs,
    skip_local_check: bool,
    timeout_secs: u64,
) -> Result<(), SendError> {
    let transport = HttpTransport::new(url, Some(Duration::from_secs(timeout_secs)))?;
    let client = ContactFormClient::new(transport);

    for (field, value) in submission.fields() {
        client.update(field, value);
    }

    if !skip_local_check && !client.can_submit() {
        return Err(SendError::Incomplete);
    }

    tracing::info!("Sending contact message to {}", url);
    let outcome = client.submit().await.ok_or(SendError::InFlight)?;
    let status = client.status().unwrap_or_default();

    if outcome.is_delivered() {
        tracing::info!("{status}");
        return Ok(());
    }

    if let SubmitOutcome::Rejected { status: code, .. } = outcome {
        tracing::warn!(status = code, "Site rejected the message");
    }
    Err(SendError::NotDelivered(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_incomplete_form_is_rejected_locally() {
        let args = SubmissionArgs {
            name: "Ada".to_string(),
            ..Default::default()
        };

        let result = run("http://127.0.0.1:9", args, false, 1).await;
        assert!(matches!(result, Err(SendError::Incomplete)));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let result = run("not a url", SubmissionArgs::default(), true, 1).await;
        assert!(matches!(result, Err(SendError::Transport(_))));
    }
}
