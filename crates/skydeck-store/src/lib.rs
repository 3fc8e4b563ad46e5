//! Local preference storage for Skydeck.

pub mod error;
pub mod favorites;
pub mod kv;
pub mod preferences;
pub mod theme;

pub use error::{StoreError, StoreResult};
pub use favorites::{city_query, Favorites};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use preferences::{Preferences, FAVORITES_KEY, THEME_KEY};
pub use theme::Theme;
