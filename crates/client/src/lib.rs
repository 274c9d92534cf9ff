//! Portfolio contact form client.
//!
//! [`ContactForm`] holds the form state. [`ContactFormClient`] drives a
//! submission through a [`SubmitTransport`], guaranteeing at most one request
//! in flight per form.
//!
//! ```no_run
//! # async fn run() -> Result<(), portfolio_client::TransportError> {
//! use portfolio_client::{ContactFormClient, HttpTransport};
//! use portfolio_core::Field;
//!
//! let client = ContactFormClient::new(HttpTransport::new("http://127.0.0.1:3000", None)?);
//! client.update(Field::Name, "Ada");
//! client.update(Field::Email, "ada@example.com");
//! client.update(Field::Message, "Hello");
//!
//! if client.can_submit() {
//!     client.submit().await;
//! }
//! println!("{:?}", client.status());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod form;
pub mod transport;

use std::sync::{Mutex, MutexGuard, PoisonError};

use portfolio_core::Field;

pub use form::{
    ContactForm, FAILED_MESSAGE, NETWORK_ERROR_MESSAGE, SENT_MESSAGE, SubmitOutcome,
};
pub use transport::{HttpTransport, SubmitTransport, TransportError, TransportResponse};

/// A contact form bound to a transport.
pub struct ContactFormClient<T> {
    transport: T,
    form: Mutex<ContactForm>,
}

impl<T: SubmitTransport> ContactFormClient<T> {
    /// Create a client with an empty form.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            form: Mutex::new(ContactForm::new()),
        }
    }

    /// Handle the submit event.
    ///
    /// Returns `None` without sending anything when a submission is already
    /// in flight. The form lock is not held across the request.
    pub async fn submit(&self) -> Option<SubmitOutcome> {
        let payload = self.lock().begin_submit()?;

        let outcome = match self.transport.post_json(&payload).await {
            Ok(response) if response.is_success() => SubmitOutcome::Delivered,
            Ok(response) => SubmitOutcome::Rejected {
                status: response.status,
                body: response.body,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Contact submission did not reach the server");
                SubmitOutcome::NetworkError
            }
        };

        self.lock().finish(&outcome);
        Some(outcome)
    }

    /// Update one field.
    pub fn update(&self, field: Field, value: impl Into<String>) {
        self.lock().set_field(field, value);
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.lock().is_submitting()
    }

    /// Status text from the last submission.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        self.lock().status().map(String::from)
    }

    /// Snapshot of the form.
    #[must_use]
    pub fn form(&self) -> ContactForm {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use portfolio_core::ContactSubmission;

    use super::*;

    /// Answers with a fixed response after a delay, counting calls.
    struct FakeTransport {
        response: Option<TransportResponse>,
        delay: Duration,
        calls: AtomicUsize,
        last: Mutex<Option<ContactSubmission>>,
    }

    impl FakeTransport {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                response: Some(TransportResponse {
                    status,
                    body: body.to_string(),
                }),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: None,
                ..Self::answering(0, "")
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl SubmitTransport for FakeTransport {
        async fn post_json(
            &self,
            submission: &ContactSubmission,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(submission.clone());
            tokio::time::sleep(self.delay).await;
            self.response.clone().ok_or(TransportError::Timeout)
        }
    }

    fn filled<T: SubmitTransport>(transport: T) -> ContactFormClient<T> {
        let client = ContactFormClient::new(transport);
        client.update(Field::Name, "Ada");
        client.update(Field::Email, "ada@example.com");
        client.update(Field::Message, "Hello");
        client
    }

    #[tokio::test]
    async fn test_success_resets_form() {
        let client = filled(FakeTransport::answering(200, r#"{"ok":true,"id":"m1"}"#));

        let outcome = client.submit().await;
        assert_eq!(outcome, Some(SubmitOutcome::Delivered));
        assert_eq!(client.status().as_deref(), Some(SENT_MESSAGE));
        assert_eq!(client.form().fields(), &ContactSubmission::default());
        assert!(!client.is_submitting());
    }

    #[tokio::test]
    async fn test_payload_is_form_snapshot() {
        let client = filled(FakeTransport::answering(200, "{}"));
        client.update(Field::Subject, "Hi");
        client.submit().await;

        let sent = client.transport.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.name, "Ada");
        assert_eq!(sent.subject, "Hi");
        assert_eq!(sent.website, "");
    }

    #[tokio::test]
    async fn test_server_error_message_shown_and_fields_kept() {
        let client = filled(FakeTransport::answering(
            400,
            r#"{"error":"Name, email, and message are required."}"#,
        ));

        client.submit().await;
        assert_eq!(
            client.status().as_deref(),
            Some("Name, email, and message are required.")
        );
        assert_eq!(client.form().field(Field::Name), "Ada");
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back() {
        let client = filled(FakeTransport::answering(502, "Bad Gateway"));

        let outcome = client.submit().await;
        assert!(matches!(outcome, Some(SubmitOutcome::Rejected { status: 502, .. })));
        assert_eq!(client.status().as_deref(), Some(FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let client = filled(FakeTransport::unreachable());

        let outcome = client.submit().await;
        assert_eq!(outcome, Some(SubmitOutcome::NetworkError));
        assert_eq!(client.status().as_deref(), Some(NETWORK_ERROR_MESSAGE));
        assert_eq!(client.form().field(Field::Message), "Hello");
    }

    #[tokio::test]
    async fn test_accepted_with_unreadable_body_is_delivered() {
        let base = transport::testing::truncated_body_server("200 OK").await;
        let client = filled(HttpTransport::new(&base, Some(Duration::from_secs(5))).unwrap());

        assert_eq!(client.submit().await, Some(SubmitOutcome::Delivered));
        assert_eq!(client.status().as_deref(), Some(SENT_MESSAGE));
        assert_eq!(client.form().field(Field::Name), "");
    }

    #[tokio::test]
    async fn test_rejected_with_unreadable_body_falls_back() {
        let base = transport::testing::truncated_body_server("500 Internal Server Error").await;
        let client = filled(HttpTransport::new(&base, Some(Duration::from_secs(5))).unwrap());

        let outcome = client.submit().await;
        assert!(matches!(outcome, Some(SubmitOutcome::Rejected { status: 500, .. })));
        assert_eq!(client.status().as_deref(), Some(FAILED_MESSAGE));
        assert_eq!(client.form().field(Field::Name), "Ada");
    }

    #[tokio::test]
    async fn test_overlapping_submits_send_one_request() {
        let client = filled(
            FakeTransport::answering(200, "{}").delayed(Duration::from_millis(50)),
        );

        let (first, second) = tokio::join!(client.submit(), client.submit());

        assert_eq!(first, Some(SubmitOutcome::Delivered));
        assert_eq!(second, None);
        assert_eq!(client.transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resubmit_after_completion() {
        let client = filled(FakeTransport::answering(500, r#"{"error":"x"}"#));

        client.submit().await;
        client.submit().await;
        assert_eq!(client.transport.calls.load(Ordering::SeqCst), 2);
    }
}
