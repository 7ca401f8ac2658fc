//! Header scroll marker.

use crate::consts::HEADER_SCROLL_THRESHOLD_PX;

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

/// Whether the header should carry the `scrolled` class at `scroll_y`.
#[must_use]
pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD_PX
}
