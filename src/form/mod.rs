//! Contact form core: rules, validation, submission state, and the controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Nothing in this module touches the document. The controller drives a
//! [`view::FormView`] implementation, which is the live DOM in the browser and
//! a recording fake in tests.

pub mod controller;
pub mod counter;
pub mod field;
pub mod rules;
pub mod state;
pub mod validate;
pub mod view;
