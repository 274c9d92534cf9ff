//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use crate::services::email;

/// Placeholder rendered for an empty optional field.
pub const EMPTY_FIELD: &str = "-";

/// Escapes HTML-significant characters.
///
/// Usage in templates: `{{ name|escape_html }}`
#[askama::filter_fn]
pub fn escape_html(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(email::escape_html(&value.to_string()))
}

/// Converts newlines to `<br/>`. Apply after `escape_html`.
///
/// Usage in templates: `{{ message|escape_html|nl2br }}`
#[askama::filter_fn]
pub fn nl2br(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(email::nl2br(&value.to_string()))
}

/// Substitutes `-` for an empty value.
///
/// Usage in templates: `{{ website|or_dash }}`
#[askama::filter_fn]
pub fn or_dash(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let value = value.to_string();
    if value.is_empty() {
        Ok(EMPTY_FIELD.to_string())
    } else {
        Ok(value)
    }
}
