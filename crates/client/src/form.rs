//! Contact form state machine.
//!
//! Mirrors what the browser form does: field edits, the advisory submit
//! check, the single in-flight submission and the status line shown after a
//! response.

use portfolio_core::{ContactSubmission, ErrorBody, Field};

/// Status shown after the server accepted the message.
pub const SENT_MESSAGE: &str = "Message sent successfully!";
/// Status shown when the server rejected the message without a usable error.
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";
/// Status shown when the request never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server answered 2xx.
    Delivered,
    /// The server answered with a non-2xx status.
    Rejected { status: u16, body: String },
    /// No response was received.
    NetworkError,
}

impl SubmitOutcome {
    /// Whether the message reached the server and was accepted.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Client-side form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactSubmission,
    submitting: bool,
    status: Option<String>,
}

impl ContactForm {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Current value of a field.
    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    /// Current field values.
    #[must_use]
    pub const fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Status text from the last submission, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the submit control is enabled.
    ///
    /// Checks the raw values: a whitespace-only name passes here and is
    /// rejected by the server.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting
            && Field::REQUIRED
                .into_iter()
                .all(|f| !self.fields.get(f).is_empty())
    }

    /// Start a submission.
    ///
    /// Returns `None` while another submission is in flight. Otherwise marks
    /// the form as submitting, clears the status and returns the payload.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.status = None;
        Some(self.fields.clone())
    }

    /// Apply the outcome of a submission.
    pub fn finish(&mut self, outcome: &SubmitOutcome) {
        let status = match outcome {
            SubmitOutcome::Delivered => {
                self.fields = ContactSubmission::default();
                SENT_MESSAGE.to_string()
            }
            SubmitOutcome::Rejected { body, .. } => rejection_message(body),
            SubmitOutcome::NetworkError => NETWORK_ERROR_MESSAGE.to_string(),
        };
        self.status = Some(status);
        self.submitting = false;
    }
}

/// The `error` string of a rejection body, or the generic failure message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| FAILED_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Message, "Hello");
        form
    }

    #[test]
    fn test_empty_form_cannot_submit() {
        assert!(!ContactForm::new().can_submit());
    }

    #[test]
    fn test_required_fields_enable_submit() {
        assert!(filled().can_submit());
    }

    #[test]
    fn test_each_required_field_blocks_submit() {
        for field in Field::REQUIRED {
            let mut form = filled();
            form.set_field(field, "");
            assert!(!form.can_submit(), "{field} should be required");
        }
    }

    #[test]
    fn test_optional_fields_do_not_block_submit() {
        let mut form = filled();
        form.set_field(Field::Subject, "");
        form.set_field(Field::Website, "");
        assert!(form.can_submit());
    }

    #[test]
    fn test_whitespace_only_passes_local_check() {
        let mut form = filled();
        form.set_field(Field::Name, "   ");
        assert!(form.can_submit());
    }

    #[test]
    fn test_begin_submit_sets_submitting_and_clears_status() {
        let mut form = filled();
        form.finish(&SubmitOutcome::NetworkError);
        assert!(form.status().is_some());

        let payload = form.begin_submit();
        assert_eq!(payload.as_ref().map(|p| p.name.as_str()), Some("Ada"));
        assert!(form.is_submitting());
        assert!(form.status().is_none());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_begin_submit_is_noop_while_submitting() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_delivered_resets_fields() {
        let mut form = filled();
        form.set_field(Field::Subject, "Hi");
        form.begin_submit();
        form.finish(&SubmitOutcome::Delivered);

        assert_eq!(form.status(), Some(SENT_MESSAGE));
        assert!(!form.is_submitting());
        assert_eq!(form.fields(), &ContactSubmission::default());
    }

    #[test]
    fn test_rejected_uses_server_error_and_keeps_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish(&SubmitOutcome::Rejected {
            status: 400,
            body: r#"{"error":"Name, email, and message are required."}"#.to_string(),
        });

        assert_eq!(form.status(), Some("Name, email, and message are required."));
        assert_eq!(form.field(Field::Name), "Ada");
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_rejected_without_usable_error_falls_back() {
        for body in ["<html>502</html>", "", "{}", r#"{"error":""}"#, r#"{"error":42}"#] {
            let mut form = filled();
            form.begin_submit();
            form.finish(&SubmitOutcome::Rejected {
                status: 502,
                body: body.to_string(),
            });
            assert_eq!(form.status(), Some(FAILED_MESSAGE), "body: {body}");
        }
    }

    #[test]
    fn test_only_delivered_counts_as_delivered() {
        assert!(SubmitOutcome::Delivered.is_delivered());
        assert!(!SubmitOutcome::NetworkError.is_delivered());
        assert!(
            !SubmitOutcome::Rejected {
                status: 200,
                body: String::new(),
            }
            .is_delivered()
        );
    }

    #[test]
    fn test_network_error_keeps_fields() {
        let mut form = filled();
        form.begin_submit();
        form.finish(&SubmitOutcome::NetworkError);

        assert_eq!(form.status(), Some(NETWORK_ERROR_MESSAGE));
        assert_eq!(form.field(Field::Message), "Hello");
        assert!(!form.is_submitting());
    }
}
