//! Contact submission payload and transport.
//!
//! The payload goes out as `multipart/form-data` with a `form-name`
//! discriminator followed by the four trimmed field values. Only the status
//! code of the response is consumed.

use std::future::Future;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::SubmitError;
use crate::form::field::{Field, FieldMap, FieldName};

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

/// A validated, trimmed snapshot of the form ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub form_name: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// RFC 3339 submit time. Logged with the submission, not sent.
    pub timestamp: String,
}

impl Submission {
    #[must_use]
    pub fn from_fields(fields: &FieldMap<Field>, form_name: &str, submitted_at: OffsetDateTime) -> Self {
        let value = |field: FieldName| fields[field].trimmed().to_owned();
        let timestamp = match submitted_at.format(&Rfc3339) {
            Ok(timestamp) => timestamp,
            Err(err) => {
                log::warn!("failed to format submit time {submitted_at}: {err}");
                String::new()
            }
        };
        Self {
            form_name: form_name.to_owned(),
            name: value(FieldName::Name),
            email: value(FieldName::Email),
            subject: value(FieldName::Subject),
            message: value(FieldName::Message),
            timestamp,
        }
    }

    /// Multipart body entries in send order.
    #[must_use]
    pub fn form_parts(&self) -> [(&'static str, &str); 5] {
        [
            (crate::consts::FORM_NAME_KEY, self.form_name.as_str()),
            (FieldName::Name.as_str(), self.name.as_str()),
            (FieldName::Email.as_str(), self.email.as_str()),
            (FieldName::Subject.as_str(), self.subject.as_str()),
            (FieldName::Message.as_str(), self.message.as_str()),
        ]
    }
}

/// Delivers a submission and reports whether it was accepted.
pub trait Transport {
    fn post(&self, submission: &Submission) -> impl Future<Output = Result<(), SubmitError>>;
}

#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map a response status to the submission outcome.
///
/// # Errors
///
/// Returns [`SubmitError::Status`] for any status outside 2xx.
pub fn status_outcome(status: u16, body: impl FnOnce() -> String) -> Result<(), SubmitError> {
    if is_success_status(status) {
        Ok(())
    } else {
        Err(SubmitError::Status { status, body: body() })
    }
}

/// Posts submissions with `fetch` from the browser.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self { endpoint: endpoint.to_owned() }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, submission: &Submission) -> Result<(), SubmitError> {
        #[cfg(feature = "hydrate")]
        {
            let body = web_sys::FormData::new().map_err(|e| SubmitError::Transport(format!("{e:?}")))?;
            for (key, value) in submission.form_parts() {
                body.append_with_str(key, value)
                    .map_err(|e| SubmitError::Transport(format!("{e:?}")))?;
            }

            let resp = gloo_net::http::Request::post(&self.endpoint)
                .body(body)
                .map_err(|e| SubmitError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| SubmitError::Transport(e.to_string()))?;

            let status = resp.status();
            let body = if is_success_status(status) {
                String::new()
            } else {
                match resp.text().await {
                    Ok(text) => text,
                    Err(e) => format!("<unreadable body: {e}>"),
                }
            };
            status_outcome(status, || body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::warn!("cannot post {} form to {} outside the browser", submission.form_name, self.endpoint);
            Err(SubmitError::Transport("not available outside the browser".to_owned()))
        }
    }
}
