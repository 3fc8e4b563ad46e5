//! Device location lookup.
//!
//! Terminals have no geolocation API, so the device position is approximated
//! from the public IP address (ip-api.com response format).

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use skydeck_core::LocationConfig;

use crate::types::{Coordinates, Location, LocationError};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    message: Option<String>,
}

/// Resolves the approximate device location.
#[derive(Debug, Clone)]
pub struct IpLocator {
    /// `None` when lookups are disabled
    client: Option<Client>,
    lookup_url: String,
}

impl IpLocator {
    pub fn new(lookup_url: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self {
            client: Some(client),
            lookup_url: lookup_url.into(),
        })
    }

    /// A locator that always reports [`LocationError::Unsupported`].
    pub fn disabled() -> Self {
        Self {
            client: None,
            lookup_url: String::new(),
        }
    }

    pub fn from_config(config: &LocationConfig, timeout: Duration) -> Result<Self, LocationError> {
        if config.enabled {
            Self::new(config.lookup_url.clone(), timeout)
        } else {
            Ok(Self::disabled())
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Look up the current position once.
    pub async fn locate(&self) -> Result<Location, LocationError> {
        let client = self.client.as_ref().ok_or(LocationError::Unsupported)?;

        let response = client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                return Err(LocationError::PermissionDenied)
            }
            s => {
                tracing::debug!("Location lookup returned status {}", s);
                return Err(LocationError::ServiceUnavailable);
            }
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(format!("Invalid location response: {}", e)))?;

        if body.status != "success" {
            tracing::debug!(
                "Location lookup failed: {}",
                body.message.as_deref().unwrap_or("no reason given")
            );
            return Err(LocationError::ServiceUnavailable);
        }

        let (latitude, longitude) = body
            .lat
            .zip(body.lon)
            .ok_or_else(|| LocationError::Other("Response is missing coordinates".to_string()))?;

        tracing::info!("Located device at {:.2}, {:.2}", latitude, longitude);
        Ok(Location {
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            city_name: body.city,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> LocationError {
    if e.is_timeout() {
        LocationError::Timeout
    } else {
        tracing::debug!("Location request failed: {}", e);
        LocationError::ServiceUnavailable
    }
}
