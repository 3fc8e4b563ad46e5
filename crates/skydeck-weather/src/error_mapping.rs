//! Maps provider and location errors to `skydeck_core::AppError`.

use skydeck_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};

use crate::types::{LocationError, ProviderError};

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Network(e) => AppError::Network(e.into_network_error()),
            ProviderError::NotFound(q) => AppError::Weather(WeatherError::LocationNotFound(q)),
            ProviderError::Unauthorized => AppError::Weather(WeatherError::InvalidApiKey),
            ProviderError::Api { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            ProviderError::Parse(m) => AppError::Network(NetworkError::InvalidResponse(m)),
        }
    }
}

impl From<LocationError> for AppError {
    fn from(e: LocationError) -> Self {
        AppError::Weather(WeatherError::LocationUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_location_not_found() {
        let app: AppError = ProviderError::NotFound("Atlantis".into()).into();
        assert!(app.is_not_found());
    }

    #[test]
    fn unauthorized_maps_to_invalid_key() {
        let app: AppError = ProviderError::Unauthorized.into();
        assert!(matches!(app, AppError::Weather(WeatherError::InvalidApiKey)));
    }

    #[test]
    fn api_error_keeps_status() {
        let app: AppError = ProviderError::Api {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(
            app,
            AppError::Network(NetworkError::ServerError { status: 502, .. })
        ));
    }

    #[test]
    fn location_errors_are_unavailable() {
        let app: AppError = LocationError::Timeout.into();
        assert_eq!(
            app.user_message(),
            "Unable to access your location. Please search manually."
        );
    }
}
