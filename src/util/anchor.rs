//! In-page links.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

/// Id of the element an in-page `href` points at.
///
/// `#contact` yields `contact`. A bare `#`, an empty fragment, or an `href`
/// that is not a fragment yields `None`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
