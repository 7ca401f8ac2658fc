//! Single-field validation against the rule table.

use super::field::FieldName;
use super::rules::{FailureKind, RuleTable, ValidationRule};

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Outcome of validating one value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    /// Failure message; empty when valid.
    pub message: String,
}

impl Validation {
    #[must_use]
    pub fn valid() -> Self {
        Self { is_valid: true, message: String::new() }
    }

    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self { is_valid: false, message: message.to_owned() }
    }
}

/// Validate `raw` for `field`. Pure: same inputs, same result.
#[must_use]
pub fn validate(rules: &RuleTable, field: FieldName, raw: &str) -> Validation {
    let rule = rules.rule(field);
    match check(rule, raw) {
        Ok(()) => Validation::valid(),
        Err(kind) => {
            log::trace!("{field} failed {} check", kind.as_str());
            Validation::failed(rule.message(kind))
        }
    }
}

/// Run the checks of `rule` in order and report the first that fails.
///
/// Lengths are UTF-16 code units of the trimmed value, the unit the
/// browser's `maxlength` and `.length` use.
///
/// # Errors
///
/// Returns the [`FailureKind`] of the first failing check.
pub fn check(rule: &ValidationRule, raw: &str) -> Result<(), FailureKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return if rule.required { Err(FailureKind::Required) } else { Ok(()) };
    }

    let len = trimmed.encode_utf16().count();
    if rule.min_length.is_some_and(|min| len < min) {
        return Err(FailureKind::MinLength);
    }
    if rule.max_length.is_some_and(|max| len > max) {
        return Err(FailureKind::MaxLength);
    }
    if rule.pattern.as_ref().is_some_and(|pattern| !pattern.is_match(trimmed)) {
        return Err(FailureKind::Pattern);
    }
    Ok(())
}
