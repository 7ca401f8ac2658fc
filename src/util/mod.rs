//! Utility helpers shared across the front-end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, media
//! queries, timers, links) from form logic.

pub mod anchor;
pub mod header;
pub mod theme;
pub mod timer;
