//! Light/dark theme preference.
//!
//! The preference is stored in `localStorage["theme"]` as `dark` or `light`
//! and applied as a `data-theme` attribute on the `<html>` element. Without a
//! stored value the operating system's `prefers-color-scheme` decides.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; non-browser builds no-op
//! so the pure parts stay testable natively.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

pub const STORAGE_KEY: &str = "theme";

/// Media query matched when the OS prefers a dark scheme.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// A recognised stored value wins; anything else defers to the system.
#[must_use]
pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    stored
        .and_then(Theme::parse)
        .unwrap_or_else(|| Theme::from_system(system_prefers_dark))
}

/// Copy shown on the toggle button. The button offers the *other* theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeButton {
    pub icon: &'static str,
    pub text: &'static str,
    pub aria_label: &'static str,
}

#[must_use]
pub fn button_copy(theme: Theme) -> ThemeButton {
    match theme {
        Theme::Dark => ThemeButton { icon: "☀️", text: "Light", aria_label: "Switch to light mode" },
        Theme::Light => ThemeButton { icon: "🌙", text: "Dark", aria_label: "Switch to dark mode" },
    }
}

/// Ctrl+Shift+D (Cmd+Shift+D on macOS).
#[must_use]
pub fn is_toggle_shortcut(ctrl: bool, meta: bool, shift: bool, key: &str) -> bool {
    (ctrl || meta) && shift && key.eq_ignore_ascii_case("d")
}

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    match web_sys::window()?.local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("localStorage unavailable: {err:?}");
            None
        }
    }
}

/// Raw stored preference, exactly as found in storage.
pub fn stored_value() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        match storage()?.get_item(STORAGE_KEY) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to read theme preference: {err:?}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Whether the OS currently prefers a dark scheme.
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.match_media(DARK_SCHEME_QUERY) {
            Ok(query) => query.is_some_and(|mq| mq.matches()),
            Err(_) => false,
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Theme to use on load: stored preference, else system preference.
pub fn read_preference() -> Theme {
    resolve(stored_value().as_deref(), system_prefers_dark())
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            if let Err(err) = el.set_attribute("data-theme", theme.as_str()) {
                log::warn!("failed to apply theme: {err:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::trace!("theme {} not applied outside the browser", theme.as_str());
    }
}

/// Toggle the theme, apply it, and persist the new preference.
pub fn toggle(current: Theme) -> Theme {
    let next = current.toggled();
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage() {
            if let Err(err) = storage.set_item(STORAGE_KEY, next.as_str()) {
                log::warn!("failed to persist theme: {err:?}");
            }
        }
    }
    log::info!("theme changed to: {}", next.as_str());
    next
}
