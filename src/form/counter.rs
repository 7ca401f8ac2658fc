//! Live character counter for length-limited fields. Cosmetic only.

use crate::consts::{WARNING_DENOMINATOR, WARNING_NUMERATOR};

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CounterLevel {
    #[default]
    Normal,
    /// Past 80% of the limit.
    Warning,
    /// Past the limit. Also implies the warning styling.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterCount {
    pub current: usize,
    pub max: usize,
}

impl CharacterCount {
    /// Count the raw value, untrimmed, in UTF-16 code units like the rules.
    #[must_use]
    pub fn new(value: &str, max: usize) -> Self {
        Self { current: value.encode_utf16().count(), max }
    }

    #[must_use]
    pub fn level(&self) -> CounterLevel {
        if self.current > self.max {
            CounterLevel::Error
        } else if self.current * WARNING_DENOMINATOR > self.max * WARNING_NUMERATOR {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.current, self.max)
    }
}
