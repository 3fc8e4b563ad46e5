//! Preference persistence for the dashboard.

use skydeck_core::AppError;
use skydeck_store::{Favorites, Preferences, Theme};

pub fn persist_theme(preferences: &Preferences, theme: Theme) {
    if let Err(e) = preferences.save_theme(theme) {
        let e = AppError::from(e);
        tracing::error!("Failed to save theme: {}", e);
    }
}

pub fn persist_favorites(preferences: &Preferences, favorites: &Favorites) {
    match preferences.save_favorites(favorites) {
        Ok(()) => tracing::debug!("Saved {} favorites", favorites.len()),
        Err(e) => {
            let e = AppError::from(e);
            tracing::error!("Failed to save favorites: {}", e);
        }
    }
}
