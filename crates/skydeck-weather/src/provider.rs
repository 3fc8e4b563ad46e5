//! OpenWeatherMap client for current conditions and the 5-day forecast.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use skydeck_core::WeatherConfig;

use crate::types::{
    Coordinates, CurrentConditions, ForecastSample, LocationQuery, ProviderError, Sky,
    UnitSystem, WeatherCondition, WeatherReport,
};

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmVolume {
    #[serde(rename = "1h")]
    h1: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: String,
    coord: OwmCoord,
    weather: Vec<OwmWeather>,
    main: OwmMain,
    #[serde(default)]
    visibility: f64,
    wind: OwmWind,
    rain: Option<OwmVolume>,
    snow: Option<OwmVolume>,
    sys: OwmSys,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastEntry {
    dt: i64,
    main: OwmForecastMain,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwmErrorBody {
    message: Option<String>,
}

fn first_sky(weather: Vec<OwmWeather>) -> Result<Sky, ProviderError> {
    let w = weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("payload has no weather entry".to_string()))?;
    Ok(Sky {
        condition: WeatherCondition::from_main(&w.main),
        label: w.main,
        description: w.description,
        icon: w.icon,
    })
}

fn timestamp(dt: i64) -> Result<DateTime<Utc>, ProviderError> {
    DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| ProviderError::Parse(format!("timestamp out of range: {}", dt)))
}

impl TryFrom<OwmCurrent> for CurrentConditions {
    type Error = ProviderError;

    fn try_from(c: OwmCurrent) -> Result<Self, Self::Error> {
        let precipitation = c
            .rain
            .and_then(|v| v.h1)
            .or_else(|| c.snow.and_then(|v| v.h1))
            .unwrap_or(0.0);

        Ok(Self {
            location_name: c.name,
            country: c.sys.country,
            coordinates: Coordinates {
                latitude: c.coord.lat,
                longitude: c.coord.lon,
            },
            sky: first_sky(c.weather)?,
            temperature: c.main.temp,
            feels_like: c.main.feels_like,
            humidity: c.main.humidity,
            pressure: c.main.pressure,
            visibility: c.visibility,
            wind_speed: c.wind.speed,
            precipitation,
            observed_at: timestamp(c.dt)?,
        })
    }
}

impl TryFrom<OwmForecastEntry> for ForecastSample {
    type Error = ProviderError;

    fn try_from(e: OwmForecastEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            timestamp: timestamp(e.dt)?,
            temperature: e.main.temp,
            sky: first_sky(e.weather)?,
        })
    }
}

/// OpenWeatherMap 2.5 API client.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.api_key.clone(),
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Fetch current conditions, then the forecast on a best-effort basis.
    ///
    /// A forecast failure is logged and reported as `forecast: None`.
    pub async fn fetch(
        &self,
        query: &LocationQuery,
        unit: UnitSystem,
    ) -> Result<WeatherReport, ProviderError> {
        let current = self.fetch_current(query, unit).await?;

        let forecast = match self.fetch_forecast(query, unit).await {
            Ok(samples) => Some(samples),
            Err(e) => {
                tracing::warn!("Forecast data unavailable for {}: {}", query, e);
                None
            }
        };

        Ok(WeatherReport {
            current,
            forecast,
            unit,
            fetched_at: Utc::now(),
        })
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(
        &self,
        query: &LocationQuery,
        unit: UnitSystem,
    ) -> Result<CurrentConditions, ProviderError> {
        let body: OwmCurrent = self.get("weather", query, unit).await?;
        let current = CurrentConditions::try_from(body)?;
        tracing::debug!("Current conditions for {}", current.display_name());
        Ok(current)
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        query: &LocationQuery,
        unit: UnitSystem,
    ) -> Result<Vec<ForecastSample>, ProviderError> {
        let body: OwmForecast = self.get("forecast", query, unit).await?;
        body.list.into_iter().map(ForecastSample::try_from).collect()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
        unit: UnitSystem,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params = query.query_pairs();
        params.push(("units", unit.as_str().to_string()));
        params.push(("appid", self.api_key.clone()));

        let response = self.client.get(&url).query(&params).send().await?;
        Self::handle_response(response, query).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        query: &LocationQuery,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()));
        }

        let message = serde_json::from_str::<OwmErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(query.to_string())),
            StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized),
            _ => Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
