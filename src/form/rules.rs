//! Declarative validation rules for the contact form.
//!
//! Each field gets one [`ValidationRule`]: whether it is required, optional
//! length bounds counted in characters, an optional pattern, and the message
//! shown for each kind of failure.

use std::collections::HashMap;

use regex::Regex;

use super::field::{FieldMap, FieldName};
use crate::error::SetupError;

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;

/// Message used when a rule fails a check it has no message for.
pub const FALLBACK_MESSAGE: &str = "Please check this field";

/// Which check of a rule rejected a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Pattern => "pattern",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    messages: HashMap<FailureKind, String>,
}

impl ValidationRule {
    #[must_use]
    pub fn required() -> Self {
        Self { required: true, ..Self::default() }
    }

    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Attach a pattern the trimmed value must match.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidPattern`] if `pattern` does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, SetupError> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_message(mut self, kind: FailureKind, message: &str) -> Self {
        self.messages.insert(kind, message.to_owned());
        self
    }

    /// Message for `kind`, or [`FALLBACK_MESSAGE`] when none was configured.
    #[must_use]
    pub fn message(&self, kind: FailureKind) -> &str {
        self.messages.get(&kind).map_or(FALLBACK_MESSAGE, String::as_str)
    }
}

/// Rules for every field of the form.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: FieldMap<ValidationRule>,
}

impl RuleTable {
    #[must_use]
    pub fn new(rules: FieldMap<ValidationRule>) -> Self {
        Self { rules }
    }

    /// The rule set of the portfolio contact form.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidPattern`] if a built-in pattern fails to
    /// compile.
    pub fn contact() -> Result<Self, SetupError> {
        let rules = FieldMap::try_from_fn(|field| match field {
            FieldName::Name => ValidationRule::required()
                .with_min_length(2)
                .with_max_length(50)
                .with_message(FailureKind::Required, "Please enter your name")
                .with_message(FailureKind::MinLength, "Name must be at least 2 characters")
                .with_message(FailureKind::MaxLength, "Name cannot exceed 50 characters")
                .with_message(FailureKind::Pattern, "Please use only letters and spaces")
                .with_pattern(r"^[a-zA-ZÀ-ÿ\s]+$"),
            FieldName::Email => ValidationRule::required()
                .with_message(FailureKind::Required, "Please enter your email")
                .with_message(FailureKind::Pattern, "Please enter a valid email address")
                .with_pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
            FieldName::Subject => Ok(ValidationRule::required()
                .with_min_length(5)
                .with_max_length(100)
                .with_message(FailureKind::Required, "Please enter a subject")
                .with_message(FailureKind::MinLength, "Subject must be at least 5 characters")
                .with_message(FailureKind::MaxLength, "Subject cannot exceed 100 characters")),
            FieldName::Message => Ok(ValidationRule::required()
                .with_min_length(10)
                .with_max_length(1000)
                .with_message(FailureKind::Required, "Please enter your message")
                .with_message(FailureKind::MinLength, "Message must be at least 10 characters")
                .with_message(FailureKind::MaxLength, "Message cannot exceed 1000 characters")),
        })?;
        Ok(Self::new(rules))
    }

    #[must_use]
    pub fn rule(&self, field: FieldName) -> &ValidationRule {
        &self.rules[field]
    }
}
