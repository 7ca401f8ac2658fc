//! Contact form fields and a fixed-size map keyed by them.

use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

/// One of the four inputs of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    /// All fields in document order.
    pub const ALL: [FieldName; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Field key as used for the element id and the multipart key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live state of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: FieldName,
    /// Raw value as typed, untrimmed.
    pub value: String,
    /// Result of the most recent validation. Starts `false`: an untouched
    /// required field is not valid.
    pub valid: bool,
    /// Message from the most recent validation; empty when valid.
    pub error: String,
}

impl Field {
    #[must_use]
    pub fn new(name: FieldName) -> Self {
        Self { name, value: String::new(), valid: false, error: String::new() }
    }

    /// Value with surrounding whitespace removed, as submitted.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// One `T` per field, indexable by [`FieldName`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap<T> {
    slots: [T; 4],
}

impl<T> FieldMap<T> {
    pub fn from_fn(f: impl FnMut(FieldName) -> T) -> Self {
        Self { slots: FieldName::ALL.map(f) }
    }

    /// Build a map where every slot may fail; the first error wins.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`, in [`FieldName::ALL`] order.
    pub fn try_from_fn<E>(mut f: impl FnMut(FieldName) -> Result<T, E>) -> Result<Self, E> {
        let [name, email, subject, message] = FieldName::ALL;
        Ok(Self { slots: [f(name)?, f(email)?, f(subject)?, f(message)?] })
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &T)> {
        FieldName::ALL.into_iter().zip(self.slots.iter())
    }
}

impl<T> Index<FieldName> for FieldMap<T> {
    type Output = T;

    fn index(&self, field: FieldName) -> &T {
        &self.slots[field.index()]
    }
}

impl<T> IndexMut<FieldName> for FieldMap<T> {
    fn index_mut(&mut self, field: FieldName) -> &mut T {
        &mut self.slots[field.index()]
    }
}
