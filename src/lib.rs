//! Front-end behaviour for the portfolio site, compiled to WebAssembly.
//!
//! The page itself is static HTML. This crate attaches to it after load and
//! owns the contact form (validation, submit gating, submission lifecycle,
//! notifications), the light/dark theme preference, and the header scroll
//! marker. Everything that decides *what* happens lives in browser-independent
//! modules; the [`dom`] layer only translates between DOM events and those
//! modules and exists behind the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`form`] | Rule table, field validator, submission state machine, and [`form::controller::FormController`] |
//! | [`net`] | Submission payload and the HTTP transport |
//! | [`util`] | Theme preference, header scroll marker, timers |
//! | [`config`] | Form endpoint and timing configuration |
//! | [`error`] | Setup and submission error types |
//! | [`consts`] | Shared copy, timings, and DOM selectors |
//! | `dom` | Live-document bindings (`hydrate` only) |

pub mod config;
pub mod consts;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod error;
pub mod form;
pub mod net;
pub mod util;

/// WASM entry point: installs logging, then mounts page chrome and the form.
///
/// A page without the contact form is valid; that case is logged and the rest
/// of the page keeps working.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }

    dom::page::mount();

    match dom::form::mount() {
        Ok(()) => log::info!("form validation initialized"),
        Err(err) => log::info!("contact form not mounted: {err}"),
    }
}
