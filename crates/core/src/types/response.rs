//! JSON bodies returned by `POST /api/contact`.

use serde::{Deserialize, Serialize};

/// Successful submission: `{"ok": true, "id": "..."}`.
///
/// `id` is the provider-assigned message id and is omitted when the provider
/// did not return one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAccepted {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ContactAccepted {
    #[must_use]
    pub const fn new(id: Option<String>) -> Self {
        Self { ok: true, id }
    }
}

/// Failed submission: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
