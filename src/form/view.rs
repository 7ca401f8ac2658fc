//! The view-update seam between the form controller and the document.

use super::counter::CharacterCount;
use super::field::FieldName;

/// Visual state of one field group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldMarker {
    /// No feedback shown: untouched, cleared, or valid but empty.
    #[default]
    Neutral,
    /// Invalid; the message is shown next to the field.
    Error(String),
    /// Valid with non-empty content.
    Success,
}

/// Text and styling of the submit control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitLabel {
    #[default]
    Submit,
    Sending,
    Sent,
    Failed,
}

impl SubmitLabel {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Sending => "Sending...",
            Self::Sent => "Message Sent!",
            Self::Failed => "Failed to Send",
        }
    }

    /// Class carried by the submit control while this label shows.
    #[must_use]
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Submit => None,
            Self::Sending => Some("loading"),
            Self::Sent => Some("success"),
            Self::Failed => Some("error"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic per controller; lets a dismiss timer target exactly the
    /// notification it was scheduled for.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Everything the controller needs to change on screen.
///
/// The controller only calls a method when the corresponding state actually
/// changed, so implementations can apply each call directly.
pub trait FormView {
    fn set_field_marker(&mut self, field: FieldName, marker: &FieldMarker);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_submit_label(&mut self, label: SubmitLabel);

    /// Show or update the counter for `field`; `None` removes it.
    fn set_character_count(&mut self, field: FieldName, count: Option<CharacterCount>);

    /// Show `notification`, replacing any notification currently shown.
    fn show_notification(&mut self, notification: &Notification);

    fn dismiss_notification(&mut self, id: u64);

    /// Move focus to `field` and bring it into view.
    fn focus_field(&mut self, field: FieldName);

    /// Clear every input's value.
    fn clear_values(&mut self);
}
