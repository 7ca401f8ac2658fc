//! Network layer: the contact submission payload and its HTTP transport.

pub mod submit;
