//! Submission lifecycle state machine.
//!
//! ```text
//!   Idle ──activity──▶ Validating ──all valid──▶ Idle
//!   Idle/Validating/Error ──submit──▶ Submitting
//!   Submitting ──2xx──▶ Success      Submitting ──failure──▶ Error
//!   Success/Error ──settled──▶ Idle
//! ```
//!
//! Events that do not apply to the current state leave it unchanged.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

/// Inputs to [`SubmissionState::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Blur, input, or a submit attempt.
    Activity,
    /// A full validation pass finished.
    Validated { all_valid: bool },
    /// A validated submission was handed to the transport.
    SubmitStarted,
    Succeeded,
    Failed,
    /// The result display window elapsed or the form was reset.
    Settled,
}

impl SubmissionState {
    #[must_use]
    pub fn next(self, event: FormEvent) -> Self {
        match (self, event) {
            (Self::Idle, FormEvent::Activity) => Self::Validating,
            (Self::Validating, FormEvent::Validated { all_valid: true }) => Self::Idle,
            // A retry may start while a failure is still on display.
            (Self::Idle | Self::Validating | Self::Error, FormEvent::SubmitStarted) => Self::Submitting,
            (Self::Submitting, FormEvent::Succeeded) => Self::Success,
            (Self::Submitting, FormEvent::Failed) => Self::Error,
            (Self::Success | Self::Error, FormEvent::Settled) => Self::Idle,
            (state, _) => state,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}
