pub mod preference_service;
pub mod weather_service;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use skydeck_store::Preferences;
use skydeck_weather::{IpLocator, WeatherProvider};

use crate::state::{Action, Effect};

pub use preference_service::{persist_favorites, persist_theme};
pub use weather_service::{request_fetch, request_locate};

/// Backends that carry out the effects produced by `update`.
#[derive(Clone)]
pub struct Services {
    pub provider: Arc<WeatherProvider>,
    pub locator: Arc<IpLocator>,
    pub preferences: Preferences,
}

impl Services {
    pub fn new(provider: WeatherProvider, locator: IpLocator, preferences: Preferences) -> Self {
        Self {
            provider: Arc::new(provider),
            locator: Arc::new(locator),
            preferences,
        }
    }

    /// Run one effect. Async work reports back on `tx`.
    pub fn execute(&self, effect: Effect, tx: &UnboundedSender<Action>) {
        match effect {
            Effect::Fetch { query, unit } => {
                tracing::debug!("Fetching weather for {} ({})", query, unit);
                request_fetch(tx, self.provider.clone(), query, unit);
            }
            Effect::Locate => request_locate(tx, self.locator.clone()),
            Effect::PersistTheme(theme) => persist_theme(&self.preferences, theme),
            Effect::PersistFavorites(favorites) => persist_favorites(&self.preferences, &favorites),
        }
    }
}
