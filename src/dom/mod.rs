//! Live-document bindings. Compiled only with the `hydrate` feature.
//!
//! Every fallible web-sys call goes through the helpers here so failures are
//! logged instead of dropped.

pub mod form;
pub mod page;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget};

/// Query a single descendant, logging selector errors.
pub(crate) fn query(root: &Element, selector: &str) -> Option<Element> {
    match root.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("bad selector {selector}: {err:?}");
            None
        }
    }
}

/// Add or remove `class` on `el`.
pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("failed to toggle class {class}: {err:?}");
    }
}

/// Create a `<tag class="class">` element.
pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Option<Element> {
    match document.create_element(tag) {
        Ok(el) => {
            el.set_class_name(class);
            Some(el)
        }
        Err(err) => {
            log::warn!("failed to create <{tag}>: {err:?}");
            None
        }
    }
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("failed to listen for {event}: {err:?}");
    }
    // Listeners live as long as the page.
    closure.forget();
}
