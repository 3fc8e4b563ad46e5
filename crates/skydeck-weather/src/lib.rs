//! Weather data for Skydeck
//!
//! OpenWeatherMap client, device location lookup, and the daily forecast
//! roll-up.

pub mod aggregate;
mod error_mapping;
pub mod location;
pub mod provider;
pub mod types;

pub use aggregate::{daily_summaries, hourly_outlook, HOURLY_OUTLOOK_LEN, MAX_FORECAST_DAYS};
pub use location::IpLocator;
pub use provider::WeatherProvider;
pub use types::*;
