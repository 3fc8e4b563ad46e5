//! Weather backend: async weather and location lookups.
//! All network work runs on spawned tasks; results come back as actions.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use skydeck_core::AppError;
use skydeck_weather::{IpLocator, LocationError, LocationQuery, UnitSystem, WeatherProvider};

use crate::state::Action;

/// Request weather for `query`.
/// Sends `Action::FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &UnboundedSender<Action>,
    provider: Arc<WeatherProvider>,
    query: LocationQuery,
    unit: UnitSystem,
) {
    let tx = tx.clone();
    let runtime = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            let _ = tx.send(Action::FetchDone {
                query,
                result: Err(AppError::Other(anyhow::anyhow!("Async runtime not available"))),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let result = provider.fetch(&query, unit).await.map_err(|e| {
            tracing::debug!("Weather fetch for {} failed: {}", query, e);
            AppError::from(e)
        });
        let _ = tx.send(Action::FetchDone { query, result });
    });
}

/// Request the device position.
/// Sends `Action::Located` on the channel when complete.
pub fn request_locate(tx: &UnboundedSender<Action>, locator: Arc<IpLocator>) {
    let tx = tx.clone();
    let runtime = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            let _ = tx.send(Action::Located(Err(LocationError::Unsupported)));
            return;
        }
    };

    runtime.spawn(async move {
        let result = locator.locate().await.map(|location| {
            if let Some(city) = &location.city_name {
                tracing::info!("Location resolved near {}", city);
            }
            location.coordinates
        });
        if let Err(e) = &result {
            tracing::warn!("Device location failed: {}", e);
        }
        let _ = tx.send(Action::Located(result));
    });
}
