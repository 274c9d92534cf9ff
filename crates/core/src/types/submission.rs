//! Contact form submission type.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    CompanyName,
    Website,
    Subject,
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::CompanyName,
        Self::Website,
        Self::Subject,
        Self::Message,
    ];

    /// Fields that must be non-empty after trimming.
    pub const REQUIRED: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// The key used for this field in the JSON request body.
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CompanyName => "companyName",
            Self::Website => "website",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

/// A contact form submission.
///
/// Transient: built from form state on submit, sent as JSON, rebuilt on the
/// server, consumed once to build an email, then dropped.
///
/// ## Constraints
///
/// - `name`, `email` and `message` are required (non-empty after trim)
/// - `email` is only checked for presence, not format
/// - `company_name`, `website` and `subject` default to the empty string
///
/// ## Examples
///
/// ```
/// use portfolio_core::ContactSubmission;
///
/// let body = serde_json::json!({
///     "name": "  Ada ",
///     "email": "ada@example.com",
///     "message": "Hello",
/// });
/// let submission = ContactSubmission::from_json(&body);
/// assert_eq!(submission.name, "Ada");
/// assert!(submission.is_complete());
///
/// let empty = ContactSubmission::from_json(&serde_json::json!({ "name": "   " }));
/// assert!(!empty.is_complete());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub website: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Rebuild a submission from an untrusted JSON body.
    ///
    /// Each field is coerced to a string and trimmed. Strings are used as-is,
    /// numbers and booleans use their JSON text, arrays join their elements
    /// with `,` and objects become `[object Object]`. Missing and `null`
    /// fields are empty. A body that is not an object yields an all-empty
    /// submission.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let field = |f: Field| coerce(body.get(f.json_key()));

        Self {
            name: field(Field::Name),
            email: field(Field::Email),
            company_name: field(Field::CompanyName),
            website: field(Field::Website),
            subject: field(Field::Subject),
            message: field(Field::Message),
        }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::CompanyName => &self.company_name,
            Field::Website => &self.website,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Replaces the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::CompanyName => &mut self.company_name,
            Field::Website => &mut self.website,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Required fields that are empty after trimming, in form order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Whether every required field has content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

fn coerce(value: Option<&Value>) -> String {
    value.map_or_else(String::new, |v| text_of(v).trim().to_owned())
}

/// String form of a JSON value, as a browser would stringify it.
///
/// Arrays join their elements with `,` (`null` elements contribute nothing),
/// objects become `[object Object]`.
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(text_of).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}
