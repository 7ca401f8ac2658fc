//! Contact form configuration.
//!
//! Defaults match a form posted back to the page origin. A page can override
//! any subset by putting a JSON object in the form's `data-config` attribute:
//!
//! ```html
//! <form id="contactForm" data-config='{"endpoint": "/contact", "resultDisplayMs": 4000}'>
//! ```
//!
//! Missing keys fall back to defaults. Unknown keys are rejected.

use serde::Deserialize;

use crate::consts::{DEFAULT_ENDPOINT, DEFAULT_FORM_NAME, NOTIFICATION_DISMISS_MS, RESULT_DISPLAY_MS};
use crate::error::SetupError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FormConfig {
    /// URL the multipart body is posted to.
    pub endpoint: String,
    /// Value of the `form-name` discriminator field.
    pub form_name: String,
    /// How long the success/failure result is shown before settling.
    pub result_display_ms: u32,
    /// Auto-dismiss delay for notifications.
    pub notification_dismiss_ms: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            form_name: DEFAULT_FORM_NAME.to_owned(),
            result_display_ms: RESULT_DISPLAY_MS,
            notification_dismiss_ms: NOTIFICATION_DISMISS_MS,
        }
    }
}

impl FormConfig {
    /// Parse a JSON override object.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] for malformed JSON or unknown keys.
    pub fn from_json(raw: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build config from an optional attribute value; absent or blank means
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Config`] when a non-blank value fails to parse.
    pub fn from_attribute(raw: Option<&str>) -> Result<Self, SetupError> {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => Self::from_json(value),
            _ => Ok(Self::default()),
        }
    }
}
