//! Light/dark preference, kept in the browser's local storage so it survives
//! reloads.

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};

/// Local storage key holding the dark mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Handle on the dark mode flag. Reading it subscribes the component;
/// toggling it writes the new value straight back to storage.
#[derive(Clone, Copy)]
pub struct DarkMode {
    enabled: Signal<bool>,
}

impl DarkMode {
    pub fn enabled(&self) -> bool {
        (self.enabled)()
    }

    pub fn toggle(&mut self) {
        let enabled = !self.enabled();
        self.enabled.set(enabled);
        if let Err(err) = LocalStorage::set(DARK_MODE_KEY, enabled) {
            tracing::warn!("Failed to store dark mode preference: {}", err);
        }
    }
}

/// Reads the stored preference on first render. A missing or unreadable
/// value means light mode.
pub fn use_dark_mode() -> DarkMode {
    let enabled = use_signal(|| LocalStorage::get::<bool>(DARK_MODE_KEY).unwrap_or(false));
    DarkMode { enabled }
}
