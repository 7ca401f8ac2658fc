//! Shared constants for the portfolio front-end.

// ── Timing ──────────────────────────────────────────────────────

/// How long a success/failure result stays on the submit control before the
/// form settles back to idle, in milliseconds.
pub const RESULT_DISPLAY_MS: u32 = 3000;

/// Auto-dismiss delay for form notifications, in milliseconds.
pub const NOTIFICATION_DISMISS_MS: u32 = 5000;

/// Duration of the `changing` class on the theme toggle, in milliseconds.
pub const THEME_CHANGING_MS: u32 = 300;

// ── Submission ──────────────────────────────────────────────────

/// Submissions post to the page's own origin.
pub const DEFAULT_ENDPOINT: &str = "/";

/// Discriminator sent with every submission so the host can route it.
pub const DEFAULT_FORM_NAME: &str = "contact";

/// Multipart key carrying the form discriminator.
pub const FORM_NAME_KEY: &str = "form-name";

// ── Notification copy ───────────────────────────────────────────

pub const SUCCESS_NOTIFICATION: &str = "Your message has been sent successfully! I'll get back to you soon.";
pub const FAILURE_NOTIFICATION: &str = "Sorry, there was an error sending your message. Please try again.";
pub const INVALID_FORM_NOTIFICATION: &str = "Please correct the errors above before submitting.";

// ── Character counter ───────────────────────────────────────────

/// The counter enters its warning state once the count exceeds
/// `WARNING_NUMERATOR / WARNING_DENOMINATOR` of the limit (80%).
pub const WARNING_NUMERATOR: usize = 4;
pub const WARNING_DENOMINATOR: usize = 5;

// ── Page chrome ─────────────────────────────────────────────────

/// Scroll offset past which the header carries the `scrolled` class.
pub const HEADER_SCROLL_THRESHOLD_PX: f64 = 50.0;

// ── DOM contract ────────────────────────────────────────────────

pub const FORM_ID: &str = "contactForm";
pub const FORM_GROUP_SELECTOR: &str = ".form-group";
pub const SUBMIT_SELECTOR: &str = ".btn-primary";
pub const SUBMIT_TEXT_SELECTOR: &str = ".btn-text";
pub const ERROR_MESSAGE_CLASS: &str = "error-message";
pub const CHARACTER_COUNT_CLASS: &str = "character-count";
pub const NOTIFICATION_CLASS: &str = "form-notification";
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";
