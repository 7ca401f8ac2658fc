//! Page chrome outside the contact form: the theme toggle, the header
//! scroll marker, and smooth in-page links.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, KeyboardEvent, MediaQueryListEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use super::{listen, query, set_class};
use crate::consts::{IN_PAGE_LINK_SELECTOR, THEME_CHANGING_MS, THEME_TOGGLE_ID};
use crate::util::anchor::fragment_id;
use crate::util::header::is_scrolled;
use crate::util::theme::{self, Theme};

/// Apply the initial theme and register the page-level listeners.
///
/// Each piece is optional: a page without `#themeToggle` or `<header>` still
/// gets the rest.
pub fn mount() {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; page chrome not mounted");
        return;
    };

    let current = Rc::new(Cell::new(theme::read_preference()));
    theme::apply(current.get());

    let button = window.document().and_then(|d| d.get_element_by_id(THEME_TOGGLE_ID));
    match &button {
        Some(button) => render_button(button, current.get()),
        None => log::debug!("no #{THEME_TOGGLE_ID} on this page"),
    }

    mount_theme_toggle(&window, &current, button.as_ref());
    mount_system_listener(&window, &current, button);
    mount_header(&window);
    mount_anchor_scrolling(&window);
}

fn render_button(button: &Element, theme: Theme) {
    let copy = theme::button_copy(theme);
    if let Some(icon) = query(button, ".icon") {
        icon.set_text_content(Some(copy.icon));
    }
    if let Some(text) = query(button, ".text") {
        text.set_text_content(Some(copy.text));
    }
    if let Err(err) = button.set_attribute("aria-label", copy.aria_label) {
        log::warn!("failed to set theme toggle label: {err:?}");
    }
}

fn flip(current: &Cell<Theme>, button: &Element) {
    set_class(button, "changing", true);
    let next = theme::toggle(current.get());
    current.set(next);
    render_button(button, next);

    let button = button.clone();
    Timeout::new(THEME_CHANGING_MS, move || set_class(&button, "changing", false)).forget();
}

fn mount_theme_toggle(window: &Window, current: &Rc<Cell<Theme>>, button: Option<&Element>) {
    let Some(button) = button else {
        return;
    };

    let state = Rc::clone(current);
    let target = button.clone();
    listen(button, "click", move |_| flip(&state, &target));

    let Some(document) = window.document() else {
        return;
    };
    let state = Rc::clone(current);
    let target = button.clone();
    listen(&document, "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if theme::is_toggle_shortcut(key.ctrl_key(), key.meta_key(), key.shift_key(), &key.key()) {
            event.prevent_default();
            flip(&state, &target);
            log::debug!("theme toggled via keyboard shortcut");
        }
    });
}

/// Follow OS scheme changes while the visitor has no stored preference.
fn mount_system_listener(window: &Window, current: &Rc<Cell<Theme>>, button: Option<Element>) {
    let scheme = match window.match_media(theme::DARK_SCHEME_QUERY) {
        Ok(Some(scheme)) => scheme,
        Ok(None) => return,
        Err(err) => {
            log::warn!("matchMedia failed: {err:?}");
            return;
        }
    };

    let state = Rc::clone(current);
    listen(&scheme, "change", move |event: Event| {
        if theme::stored_value().is_some_and(|value| !value.is_empty()) {
            return;
        }
        let Some(change) = event.dyn_ref::<MediaQueryListEvent>() else {
            return;
        };
        let next = Theme::from_system(change.matches());
        theme::apply(next);
        state.set(next);
        if let Some(button) = &button {
            render_button(button, next);
        }
        log::info!("system theme changed to: {}", next.as_str());
    });
}

fn mount_header(window: &Window) {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    let Some(header) = query(&root, "header") else {
        log::debug!("no <header> on this page");
        return;
    };

    let source = window.clone();
    listen(window, "scroll", move |_| match source.scroll_y() {
        Ok(offset) => set_class(&header, "scrolled", is_scrolled(offset)),
        Err(err) => log::warn!("scrollY unavailable: {err:?}"),
    });
}

/// Smooth-scroll to the target of every `a[href^="#"]` instead of jumping.
fn mount_anchor_scrolling(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let anchors = match document.query_selector_all(IN_PAGE_LINK_SELECTOR) {
        Ok(anchors) => anchors,
        Err(err) => {
            log::warn!("bad selector {IN_PAGE_LINK_SELECTOR}: {err:?}");
            return;
        }
    };

    for index in 0..anchors.length() {
        let Some(node) = anchors.get(index) else {
            continue;
        };
        let Ok(anchor) = node.dyn_into::<Element>() else {
            continue;
        };
        let source = anchor.clone();
        let document = document.clone();
        listen(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let href = source.get_attribute("href").unwrap_or_default();
            scroll_to_fragment(&document, &href);
        });
    }
}

fn scroll_to_fragment(document: &Document, href: &str) {
    let Some(id) = fragment_id(href) else {
        log::debug!("in-page link {href:?} names no target");
        return;
    };
    let Some(target) = document.get_element_by_id(id) else {
        log::warn!("in-page link target #{id} not found");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
