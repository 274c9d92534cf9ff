//! Command implementations.

pub mod preview;
pub mod send;

use clap::Args;
use portfolio_core::{ContactSubmission, Field};

/// Contact form fields shared by `send` and `preview`.
#[derive(Debug, Clone, Default, Args)]
pub struct SubmissionArgs {
    /// Your name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Your email address
    #[arg(short, long, default_value = "")]
    pub email: String,

    /// Company name
    #[arg(long, default_value = "")]
    pub company: String,

    /// Website
    #[arg(long, default_value = "")]
    pub website: String,

    /// Subject
    #[arg(short, long, default_value = "")]
    pub subject: String,

    /// Message body (use `\n` in the shell for line breaks)
    #[arg(short, long, default_value = "")]
    pub message: String,
}

impl SubmissionArgs {
    /// Field values in form order.
    pub fn fields(self) -> [(Field, String); 6] {
        [
            (Field::Name, self.name),
            (Field::Email, self.email),
            (Field::CompanyName, self.company),
            (Field::Website, self.website),
            (Field::Subject, self.subject),
            (Field::Message, self.message),
        ]
    }

    /// The raw submission, untrimmed.
    pub fn into_submission(self) -> ContactSubmission {
        let mut submission = ContactSubmission::default();
        for (field, value) in self.fields() {
            submission.set(field, value);
        }
        submission
    }
}
