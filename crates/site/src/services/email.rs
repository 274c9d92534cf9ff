//! Contact email rendering and the provider seam.
//!
//! The HTML body is rendered with an Askama template. Every submitted value
//! goes through [`escape_html`] before it reaches the markup, and the message
//! has its newlines turned into `<br/>` only after escaping.

use std::time::Duration;

use askama::Template;
use async_trait::async_trait;
use thiserror::Error;

use portfolio_core::ContactSubmission;

use crate::filters;

/// Error produced when the email template fails to render.
pub use askama::Error as RenderError;

/// Subject prefix used when the sender supplied a subject.
const SUBJECT_PREFIX: &str = "New contact form message: ";

/// Subject prefix used when the subject was left empty.
const SUBJECT_FALLBACK_PREFIX: &str = "New contact form message from ";

/// HTML body for a relayed contact message.
#[derive(Template)]
#[template(path = "email/contact_submission.html", escape = "none")]
struct ContactEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    company_name: &'a str,
    website: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Errors that can occur when handing an email to a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Provider did not answer in time.
    #[error("provider did not respond within {0:?}")]
    Timeout(Duration),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client could not be built from configuration.
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

/// An email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub reply_to: String,
    pub html: String,
}

/// Result of a successful provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Message id assigned by the provider, if it returned one
    pub id: Option<String>,
}

/// Sender and destination addresses for contact messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAddresses {
    pub from: String,
    pub to: String,
}

/// A transactional email provider.
///
/// Exactly one `send` call is made per accepted contact submission.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send a single email.
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}

/// Escape the five HTML-significant characters.
///
/// Applied exactly once: an input of `&amp;` becomes `&amp;amp;`.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every `\n` with `<br/>`. Run on already escaped text.
#[must_use]
pub fn nl2br(input: &str) -> String {
    input.replace('\n', "<br/>")
}

/// Subject line for a contact message.
#[must_use]
pub fn contact_subject(submission: &ContactSubmission) -> String {
    if submission.subject.is_empty() {
        format!("{SUBJECT_FALLBACK_PREFIX}{}", submission.name)
    } else {
        format!("{SUBJECT_PREFIX}{}", submission.subject)
    }
}

/// Render the HTML body for a contact message.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_contact_html(submission: &ContactSubmission) -> Result<String, RenderError> {
    ContactEmailHtml {
        name: &submission.name,
        email: &submission.email,
        company_name: &submission.company_name,
        website: &submission.website,
        subject: &submission.subject,
        message: &submission.message,
    }
    .render()
}

/// Build the outbound email for a validated submission.
///
/// The submitter's address becomes `reply_to` so the recipient can answer
/// directly.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn contact_email(
    submission: &ContactSubmission,
    addresses: &ContactAddresses,
) -> Result<OutboundEmail, RenderError> {
    Ok(OutboundEmail {
        from: addresses.from.clone(),
        to: addresses.to.clone(),
        subject: contact_subject(submission),
        reply_to: submission.email.clone(),
        html: render_contact_html(submission)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
            ..Default::default()
        }
    }

    fn addresses() -> ContactAddresses {
        ContactAddresses {
            from: "site@example.com".to_string(),
            to: "me@example.com".to_string(),
        }
    }

    #[test]
    fn test_escape_html_all_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_is_not_idempotent() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_nl2br() {
        assert_eq!(nl2br("line1\nline2\n"), "line1<br/>line2<br/>");
    }

    #[test]
    fn test_subject_with_subject() {
        let mut s = submission();
        s.subject = "Project".to_string();
        assert_eq!(contact_subject(&s), "New contact form message: Project");
    }

    #[test]
    fn test_subject_falls_back_to_name() {
        assert_eq!(
            contact_subject(&submission()),
            "New contact form message from Ada"
        );
    }

    #[test]
    fn test_render_escapes_script() {
        let mut s = submission();
        s.message = "<script>alert(1)</script>".to_string();
        let html = render_contact_html(&s).unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_message_newlines_after_escaping() {
        let mut s = submission();
        s.message = "line1\nline2".to_string();
        let html = render_contact_html(&s).unwrap();
        assert!(html.contains("line1<br/>line2"));
    }

    #[test]
    fn test_render_injected_br_stays_escaped() {
        let mut s = submission();
        s.message = "a<br/>b\nc".to_string();
        let html = render_contact_html(&s).unwrap();
        assert!(html.contains("a&lt;br/&gt;b<br/>c"));
    }

    #[test]
    fn test_render_optional_fields_placeholder() {
        let html = render_contact_html(&submission()).unwrap();
        assert!(html.contains("<strong>Company Name:</strong> -</p>"));
        assert!(html.contains("<strong>Website:</strong> -</p>"));
        assert!(html.contains("<strong>Subject:</strong> -</p>"));
    }

    #[test]
    fn test_render_optional_fields_escaped_when_present() {
        let mut s = submission();
        s.company_name = "Smith & Sons".to_string();
        s.website = "https://example.com/?a=1&b=2".to_string();
        let html = render_contact_html(&s).unwrap();
        assert!(html.contains("<strong>Company Name:</strong> Smith &amp; Sons</p>"));
        assert!(html.contains("<strong>Website:</strong> https://example.com/?a=1&amp;b=2</p>"));
    }

    #[test]
    fn test_render_all_fields_present() {
        let html = render_contact_html(&submission()).unwrap();
        assert!(html.contains("<strong>Name:</strong> Ada</p>"));
        assert!(html.contains("<strong>Email:</strong> ada@example.com</p>"));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_contact_email_fields() {
        let email = contact_email(&submission(), &addresses()).unwrap();
        assert_eq!(email.from, "site@example.com");
        assert_eq!(email.to, "me@example.com");
        assert_eq!(email.reply_to, "ada@example.com");
        assert_eq!(email.subject, "New contact form message from Ada");
        assert!(email.html.contains("Ada"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Api {
            status: 422,
            message: "invalid from".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 422 - invalid from");
    }
}
