//! Declarative view of the dashboard.
//!
//! A `View` is derived from `AppState` and a time zone only. It holds every
//! string the renderer prints, so formatting rules are testable without a
//! terminal.

use chrono::{DateTime, TimeZone, Timelike};

use skydeck_store::Theme;
use skydeck_weather::{
    daily_summaries, hourly_outlook, icon_url, Backdrop, DailySummary, ForecastSample,
    Particles, UnitSystem, WeatherReport,
};

use crate::state::AppState;

pub const UV_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub clock: String,
    pub theme: Theme,
    /// Unit selector label, reflects the selected unit
    pub unit_label: &'static str,
    pub loading: bool,
    pub notice: Option<&'static str>,
    pub backdrop: Backdrop,
    pub particles: Option<Particles>,
    pub weather: Option<WeatherPanel>,
    pub favorites: Vec<String>,
    pub popular_cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub title: String,
    pub coordinates: String,
    pub icon_url: String,
    pub fallback_icon: &'static str,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
    pub uv_index: &'static str,
    pub precipitation: String,
    pub is_favorite: bool,
    pub forecast: Option<ForecastPanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPanel {
    pub hourly: Vec<HourCell>,
    pub daily: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourCell {
    pub label: String,
    pub icon_url: String,
    pub fallback_icon: &'static str,
    pub temperature: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub label: String,
    pub icon_url: String,
    pub fallback_icon: &'static str,
    pub high: String,
    pub low: String,
    pub description: String,
}

impl View {
    pub fn build<Tz>(state: &AppState, tz: &Tz, icon_base_url: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let (backdrop, particles) = state
            .report
            .as_ref()
            .map(|r| {
                let condition = r.current.sky.condition;
                (condition.backdrop(), condition.particles())
            })
            .unwrap_or_default();

        let weather = match (&state.report, state.notice) {
            (Some(report), None) => Some(WeatherPanel::build(
                report,
                state.is_current_favorite(),
                tz,
                icon_base_url,
            )),
            _ => None,
        };

        Self {
            clock: format_clock(&state.now.with_timezone(tz)),
            theme: state.theme,
            unit_label: state.unit.temperature_symbol(),
            loading: state.loading,
            notice: state.notice.map(|n| n.message()),
            backdrop,
            particles,
            weather,
            favorites: state.favorites.iter().map(str::to_string).collect(),
            popular_cities: state.popular_cities.clone(),
        }
    }

    pub fn show_favorites(&self) -> bool {
        !self.favorites.is_empty()
    }
}

impl WeatherPanel {
    fn build<Tz: TimeZone>(
        report: &WeatherReport,
        is_favorite: bool,
        tz: &Tz,
        icon_base_url: &str,
    ) -> Self {
        let current = &report.current;
        let unit = report.unit;
        let symbol = unit.temperature_symbol();

        let forecast = report.forecast.as_deref().map(|samples| ForecastPanel {
            hourly: hourly_outlook(samples)
                .iter()
                .map(|s| HourCell::build(s, unit, tz, icon_base_url))
                .collect(),
            daily: daily_summaries(samples, tz)
                .iter()
                .enumerate()
                .map(|(i, d)| DayCell::build(i, d, unit, icon_base_url))
                .collect(),
        });

        Self {
            title: current.display_name(),
            coordinates: format!(
                "{:.2}°, {:.2}°",
                current.coordinates.latitude, current.coordinates.longitude
            ),
            icon_url: icon_url(icon_base_url, &current.sky.icon, 4),
            fallback_icon: current.sky.condition.icon_name(),
            temperature: format!("{}{}", round_half_up(current.temperature), symbol),
            description: current.sky.description.clone(),
            feels_like: format!("{}{}", round_half_up(current.feels_like), symbol),
            humidity: format!("{}%", current.humidity),
            wind: format_wind(current.wind_speed, unit),
            visibility: format_visibility(current.visibility),
            pressure: format!("{} hPa", current.pressure),
            uv_index: UV_UNAVAILABLE,
            precipitation: format!("{} mm", current.precipitation),
            is_favorite,
            forecast,
        }
    }
}

impl HourCell {
    fn build<Tz: TimeZone>(
        sample: &ForecastSample,
        unit: UnitSystem,
        tz: &Tz,
        icon_base_url: &str,
    ) -> Self {
        Self {
            label: hour_label(sample.timestamp.with_timezone(tz).hour()),
            icon_url: icon_url(icon_base_url, &sample.sky.icon, 2),
            fallback_icon: sample.sky.condition.icon_name(),
            temperature: format!("{}{}", round_half_up(sample.temperature), cell_symbol(unit)),
            condition: sample.sky.label.clone(),
        }
    }
}

impl DayCell {
    fn build(index: usize, day: &DailySummary, unit: UnitSystem, icon_base_url: &str) -> Self {
        let label = if index == 0 {
            "Today".to_string()
        } else {
            day.date.format("%a").to_string()
        };
        let sky = &day.representative.sky;

        Self {
            label,
            icon_url: icon_url(icon_base_url, &sky.icon, 2),
            fallback_icon: sky.condition.icon_name(),
            high: format!("{}{}", round_half_up(day.max), cell_symbol(unit)),
            low: format!("{}{}", round_half_up(day.min), cell_symbol(unit)),
            description: sky.description.clone(),
        }
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// "Monday, October 19, 2026 at 10:30 AM"
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y at %I:%M %p").to_string()
}

/// 12-hour label for an hour of the day: "12 AM", "3 PM".
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{} AM", h),
    }
}

/// Wind speed arrives in m/s for metric and mph for imperial.
pub fn format_wind(speed: f64, unit: UnitSystem) -> String {
    match unit {
        UnitSystem::Metric => format!("{:.1} km/h", speed * 3.6),
        UnitSystem::Imperial => format!("{:.1} mph", speed),
    }
}

pub fn format_visibility(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

fn cell_symbol(unit: UnitSystem) -> &'static str {
    match unit {
        UnitSystem::Metric => "°",
        UnitSystem::Imperial => "°F",
    }
}
