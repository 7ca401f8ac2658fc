//! Error types for form setup and submission.

/// Failure to deliver a submission.
///
/// Transport failures and non-2xx responses are reported to the user the same
/// way; the distinction only survives for logging.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request never produced a response (network failure, CORS, abort).
    #[error("submission transport failed: {0}")]
    Transport(String),
    /// The server answered with a status outside 2xx. `body` is the
    /// response text, kept for the log line.
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failure while wiring the form to the page.
///
/// None of these are fatal to the page: the caller logs and skips setup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A required element of the form markup is absent.
    #[error("required element not found: {0}")]
    MissingElement(&'static str),
    /// A validation rule carries a pattern that does not compile.
    #[error("invalid validation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// The `data-config` attribute on the form is not valid config JSON.
    #[error("invalid form config: {0}")]
    Config(#[from] serde_json::Error),
}
