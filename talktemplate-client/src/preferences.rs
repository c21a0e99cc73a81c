//! UI theme preference
//!
//! The second piece of shared client state next to the session: a light/dark
//! toggle persisted through the same storage capability. A missing or
//! unrecognized stored value falls back to light.

use talktemplate_core::{session_keys, SessionStore};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_stored(raw: &str) -> Self {
        match raw {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Load the persisted theme; storage errors and unknown values both land on
/// the default
pub fn load(store: &dyn SessionStore) -> Theme {
    match store.get(session_keys::THEME) {
        Ok(Some(raw)) => Theme::from_stored(&raw),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("Failed to read theme preference: {}", e);
            Theme::default()
        }
    }
}

/// Persist a theme choice; a write failure keeps the in-memory choice
pub fn save(store: &dyn SessionStore, theme: Theme) {
    if let Err(e) = store.set(session_keys::THEME, theme.as_str()) {
        warn!("Failed to persist theme preference: {}", e);
    }
}

/// Flip the persisted theme and return the new value
pub fn toggle(store: &dyn SessionStore) -> Theme {
    let next = load(store).toggled();
    save(store, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_theme_defaults_to_light() {
        let store = MemoryStore::new();
        assert_eq!(load(&store), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryStore::new();

        assert_eq!(toggle(&store), Theme::Dark);
        assert_eq!(load(&store), Theme::Dark);

        assert_eq!(toggle(&store), Theme::Light);
        assert_eq!(load(&store), Theme::Light);
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_light() {
        let store = MemoryStore::new();
        store.set(session_keys::THEME, "sepia").unwrap();
        assert_eq!(load(&store), Theme::Light);
    }
}
