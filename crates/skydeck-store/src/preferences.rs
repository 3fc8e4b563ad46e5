//! Theme and favorites persisted through a [`KeyValueStore`].

use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::favorites::Favorites;
use crate::kv::KeyValueStore;
use crate::theme::Theme;

pub const THEME_KEY: &str = "weatherTheme";
pub const FAVORITES_KEY: &str = "weatherFavorites";

/// User preferences. Read once at startup, written on every change.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme; missing or unreadable values fall back to light.
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> StoreResult<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Stored favorites; missing or unreadable values give an empty list.
    pub fn load_favorites(&self) -> Favorites {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Favorites::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                return Favorites::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => Favorites::from_entries(entries),
            Err(e) => {
                tracing::warn!("Ignoring corrupted favorites list: {}", e);
                Favorites::new()
            }
        }
    }

    pub fn save_favorites(&self, favorites: &Favorites) -> StoreResult<()> {
        let json = serde_json::to_string(favorites).map_err(|source| StoreError::Encode {
            key: FAVORITES_KEY.to_string(),
            source,
        })?;
        self.store.set(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    fn prefs() -> (Arc<MemoryKvStore>, Preferences) {
        let store = Arc::new(MemoryKvStore::new());
        let prefs = Preferences::new(store.clone());
        (store, prefs)
    }

    #[test]
    fn defaults_when_empty() {
        let (_, prefs) = prefs();
        assert_eq!(prefs.load_theme(), Theme::Light);
        assert!(prefs.load_favorites().is_empty());
    }

    #[test]
    fn theme_roundtrip_uses_plain_string() {
        let (store, prefs) = prefs();
        prefs.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(prefs.load_theme(), Theme::Dark);
    }

    #[test]
    fn favorites_stored_as_json_list() {
        let (store, prefs) = prefs();
        let favs = Favorites::from_entries(["Oslo, NO", "Lima, PE"]);
        prefs.save_favorites(&favs).unwrap();

        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["Oslo, NO","Lima, PE"]"#)
        );
        assert_eq!(prefs.load_favorites(), favs);
    }

    #[test]
    fn corrupted_values_fall_back_to_defaults() {
        let (store, prefs) = prefs();
        store.set(THEME_KEY, "sepia").unwrap();
        store.set(FAVORITES_KEY, "{not json").unwrap();

        assert_eq!(prefs.load_theme(), Theme::Light);
        assert!(prefs.load_favorites().is_empty());
    }
}
