use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use skydeck_core::UnitSystem;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the provider is asked about: a free-text city or a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Query-string pairs selecting the location.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.clone())],
            Self::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        }
    }

    pub fn is_city(&self) -> bool {
        matches!(self, Self::City(_))
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
        }
    }
}

/// Weather condition groups as reported in OpenWeatherMap's `weather[].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
    Unknown,
}

impl WeatherCondition {
    /// Map the provider's `main` label. Matching is case-insensitive.
    pub fn from_main(main: &str) -> Self {
        match main.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" => Self::Mist,
            "smoke" => Self::Smoke,
            "haze" => Self::Haze,
            "dust" => Self::Dust,
            "fog" => Self::Fog,
            "sand" => Self::Sand,
            "ash" => Self::Ash,
            "squall" => Self::Squall,
            "tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    /// Fallback icon name, used when the provider's icon image is unavailable.
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear | Self::Unknown => "sun",
            Self::Clouds => "cloud",
            Self::Rain => "cloud-rain",
            Self::Drizzle => "cloud-drizzle",
            Self::Thunderstorm => "bolt",
            Self::Snow => "snowflake",
            Self::Mist
            | Self::Smoke
            | Self::Haze
            | Self::Dust
            | Self::Fog
            | Self::Sand
            | Self::Ash => "smog",
            Self::Squall => "wind",
            Self::Tornado => "tornado",
        }
    }

    /// Background theme for this condition.
    pub fn backdrop(&self) -> Backdrop {
        match self {
            Self::Clear => Backdrop::Clear,
            Self::Clouds => Backdrop::Clouds,
            Self::Rain | Self::Drizzle => Backdrop::Rain,
            Self::Snow => Backdrop::Snow,
            Self::Thunderstorm => Backdrop::Thunderstorm,
            Self::Mist
            | Self::Smoke
            | Self::Haze
            | Self::Dust
            | Self::Fog
            | Self::Sand
            | Self::Ash => Backdrop::Mist,
            Self::Squall | Self::Tornado | Self::Unknown => Backdrop::Plain,
        }
    }

    /// Decorative particle effect for this condition, if any.
    pub fn particles(&self) -> Option<Particles> {
        match self {
            Self::Rain | Self::Drizzle => Some(Particles {
                kind: ParticleKind::Rain,
                count: 100,
            }),
            Self::Snow => Some(Particles {
                kind: ParticleKind::Snow,
                count: 50,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backdrop {
    #[default]
    Plain,
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Rain,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Particles {
    pub kind: ParticleKind,
    pub count: usize,
}

/// The first `weather[]` element of a provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sky {
    pub condition: WeatherCondition,
    /// Raw `main` label, e.g. "Clouds"
    pub label: String,
    /// Free-text description, e.g. "scattered clouds"
    pub description: String,
    /// Provider icon id, e.g. "03d"
    pub icon: String,
}

/// Current conditions at a location.
///
/// Temperatures follow the requested unit system. Wind speed is m/s for
/// metric and mph for imperial, as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub sky: Sky,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    /// Meters
    pub visibility: f64,
    pub wind_speed: f64,
    /// Last hour, mm (rain, else snow, else zero)
    pub precipitation: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    /// `"<name>, <country>"`, the key under which favorites are stored.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.location_name, self.country)
    }
}

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub sky: Sky,
}

/// Per-calendar-day roll-up of forecast samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// First sample seen for this date; drives the icon and description
    pub representative: ForecastSample,
    pub min: f64,
    pub max: f64,
}

/// Result of one completed lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// `None` when the forecast request failed
    pub forecast: Option<Vec<ForecastSample>>,
    pub unit: UnitSystem,
    pub fetched_at: DateTime<Utc>,
}

/// Device location as reported by a location provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: Coordinates,
    pub city_name: Option<String>,
}

/// Build the URL of a provider icon at the given pixel density (2 or 4).
pub fn icon_url(base_url: &str, icon: &str, scale: u8) -> String {
    format!("{}/{}@{}x.png", base_url.trim_end_matches('/'), icon, scale)
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location lookup is disabled")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("API key rejected by provider")]
    Unauthorized,
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_main() {
        assert_eq!(WeatherCondition::from_main("Clear"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_main("clouds"), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_main("Haze"), WeatherCondition::Haze);
        assert_eq!(WeatherCondition::from_main("Volcano"), WeatherCondition::Unknown);
    }

    #[test]
    fn test_condition_icon_name() {
        assert_eq!(WeatherCondition::Clear.icon_name(), "sun");
        assert_eq!(WeatherCondition::Drizzle.icon_name(), "cloud-drizzle");
        assert_eq!(WeatherCondition::Sand.icon_name(), "smog");
        assert_eq!(WeatherCondition::Unknown.icon_name(), "sun");
    }

    #[test]
    fn test_haze_family_shares_mist_backdrop() {
        for main in ["Mist", "Smoke", "Haze", "Dust", "Fog", "Sand", "Ash"] {
            assert_eq!(WeatherCondition::from_main(main).backdrop(), Backdrop::Mist, "{main}");
        }
        assert_eq!(WeatherCondition::Drizzle.backdrop(), Backdrop::Rain);
        assert_eq!(WeatherCondition::Tornado.backdrop(), Backdrop::Plain);
    }

    #[test]
    fn test_particles() {
        assert_eq!(WeatherCondition::Rain.particles().map(|p| p.count), Some(100));
        assert_eq!(WeatherCondition::Drizzle.particles().map(|p| p.kind), Some(ParticleKind::Rain));
        assert_eq!(WeatherCondition::Snow.particles().map(|p| p.count), Some(50));
        assert!(WeatherCondition::Clouds.particles().is_none());
    }

    #[test]
    fn test_query_pairs() {
        let city = LocationQuery::City("São Paulo".to_string());
        assert_eq!(city.query_pairs(), vec![("q", "São Paulo".to_string())]);

        let coords = LocationQuery::Coordinates(Coordinates {
            latitude: 51.5,
            longitude: -0.12,
        });
        assert_eq!(
            coords.query_pairs(),
            vec![("lat", "51.5".to_string()), ("lon", "-0.12".to_string())]
        );
        assert!(!coords.is_city());
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("https://openweathermap.org/img/wn/", "10d", 4),
            "https://openweathermap.org/img/wn/10d@4x.png"
        );
    }
}
