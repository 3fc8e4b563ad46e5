//! Dashboard state and its pure update function.
//!
//! `update` never performs I/O. Anything that must happen outside the state
//! record (network, location, persistence) is returned as an [`Effect`]; the
//! runtime executes effects and feeds their results back as actions.

use chrono::{DateTime, Utc};

use skydeck_core::AppError;
use skydeck_store::{city_query, Favorites, Theme};
use skydeck_weather::{Coordinates, LocationError, LocationQuery, UnitSystem, WeatherReport};

/// Dismissible message shown in place of the weather panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CityNotFound,
    LocationWeatherFailed,
    GeolocationUnsupported,
    GeolocationUnavailable,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::CityNotFound => "City not found. Please check the spelling and try again.",
            Notice::LocationWeatherFailed => "Failed to get weather for your location.",
            Notice::GeolocationUnsupported => "Geolocation is not supported on this device.",
            Notice::GeolocationUnavailable => {
                "Unable to access your location. Please search manually."
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub unit: UnitSystem,
    pub theme: Theme,
    pub favorites: Favorites,
    /// Last completed lookup; kept while a notice is shown
    pub report: Option<WeatherReport>,
    pub loading: bool,
    pub notice: Option<Notice>,
    pub now: DateTime<Utc>,
    pub popular_cities: Vec<String>,
}

impl AppState {
    pub fn new(
        unit: UnitSystem,
        theme: Theme,
        favorites: Favorites,
        popular_cities: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            unit,
            theme,
            favorites,
            popular_cities: popular_cities
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            now,
            ..Self::default()
        }
    }

    /// Favorites key of the displayed location.
    pub fn current_key(&self) -> Option<String> {
        self.report.as_ref().map(|r| r.current.display_name())
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current_key()
            .is_some_and(|key| self.favorites.contains(&key))
    }
}

#[derive(Debug)]
pub enum Action {
    Search(String),
    /// Zero-based index into the favorites list
    OpenFavorite(usize),
    /// Zero-based index into the popular cities
    OpenPopular(usize),
    Locate,
    Located(Result<Coordinates, LocationError>),
    FetchDone {
        query: LocationQuery,
        result: Result<WeatherReport, AppError>,
    },
    ToggleUnit,
    ToggleTheme,
    ToggleFavorite,
    /// Zero-based index into the favorites list
    RemoveFavorite(usize),
    DismissNotice,
    Tick(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch {
        query: LocationQuery,
        unit: UnitSystem,
    },
    Locate,
    PersistTheme(Theme),
    PersistFavorites(Favorites),
}

/// Apply `action` to `state`.
pub fn update(mut state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let effects = match action {
        Action::Search(text) => search(&mut state, &text),
        Action::OpenFavorite(index) => match state.favorites.get(index) {
            Some(entry) => {
                let city = city_query(entry).to_string();
                search(&mut state, &city)
            }
            None => Vec::new(),
        },
        Action::OpenPopular(index) => match state.popular_cities.get(index) {
            Some(city) => {
                let city = city.clone();
                search(&mut state, &city)
            }
            None => Vec::new(),
        },
        Action::Locate => {
            state.loading = true;
            state.notice = None;
            vec![Effect::Locate]
        }
        Action::Located(Ok(coordinates)) => vec![Effect::Fetch {
            query: LocationQuery::Coordinates(coordinates),
            unit: state.unit,
        }],
        Action::Located(Err(e)) => {
            state.loading = false;
            state.notice = Some(match e {
                LocationError::Unsupported => Notice::GeolocationUnsupported,
                _ => Notice::GeolocationUnavailable,
            });
            Vec::new()
        }
        Action::FetchDone { query, result } => {
            state.loading = false;
            match result {
                Ok(report) => {
                    state.report = Some(report);
                    state.notice = None;
                }
                Err(_) => {
                    state.notice = Some(if query.is_city() {
                        Notice::CityNotFound
                    } else {
                        Notice::LocationWeatherFailed
                    });
                }
            }
            Vec::new()
        }
        Action::ToggleUnit => {
            state.unit = state.unit.toggled();
            match state.report.as_ref().map(|r| r.current.location_name.clone()) {
                Some(name) => search(&mut state, &name),
                None => Vec::new(),
            }
        }
        Action::ToggleTheme => {
            state.theme = state.theme.toggled();
            vec![Effect::PersistTheme(state.theme)]
        }
        Action::ToggleFavorite => match state.current_key() {
            Some(key) => {
                state.favorites.toggle(&key);
                vec![Effect::PersistFavorites(state.favorites.clone())]
            }
            None => Vec::new(),
        },
        Action::RemoveFavorite(index) => {
            let entry = state.favorites.get(index).map(str::to_string);
            match entry {
                Some(entry) if state.favorites.remove(&entry) => {
                    vec![Effect::PersistFavorites(state.favorites.clone())]
                }
                _ => Vec::new(),
            }
        }
        Action::DismissNotice => {
            state.notice = None;
            Vec::new()
        }
        Action::Tick(now) => {
            state.now = now;
            Vec::new()
        }
    };

    (state, effects)
}

fn search(state: &mut AppState, text: &str) -> Vec<Effect> {
    let city = text.trim();
    if city.is_empty() {
        return Vec::new();
    }

    state.loading = true;
    state.notice = None;
    vec![Effect::Fetch {
        query: LocationQuery::City(city.to_string()),
        unit: state.unit,
    }]
}


#[cfg(test)]
mod tests {
    use super::fixtures::report;
    use super::*;

    fn state() -> AppState {
        AppState::new(
            UnitSystem::Metric,
            Theme::Light,
            Favorites::new(),
            vec!["London".into(), " ".into(), "Tokyo".into()],
            Utc::now(),
        )
    }

    fn with_report(name: &str, country: &str) -> AppState {
        let (state, _) = update(
            state(),
            Action::FetchDone {
                query: LocationQuery::City(name.to_string()),
                result: Ok(report(name, country, UnitSystem::Metric)),
            },
        );
        state
    }

    fn city_fetch(city: &str, unit: UnitSystem) -> Effect {
        Effect::Fetch {
            query: LocationQuery::City(city.to_string()),
            unit,
        }
    }

    #[test]
    fn blank_popular_cities_are_dropped() {
        assert_eq!(state().popular_cities, vec!["London", "Tokyo"]);
    }

    #[test]
    fn search_trims_and_starts_loading() {
        let (state, effects) = update(state(), Action::Search("  Paris ".into()));
        assert!(state.loading);
        assert_eq!(effects, vec![city_fetch("Paris", UnitSystem::Metric)]);
    }

    #[test]
    fn empty_search_is_noop() {
        let before = state();
        let (after, effects) = update(before.clone(), Action::Search("   ".into()));
        assert!(effects.is_empty());
        assert_eq!(after, before);
    }

    #[test]
    fn successful_fetch_sets_report_and_clears_notice() {
        let mut s = state();
        s.notice = Some(Notice::CityNotFound);
        s.loading = true;
        let (s, effects) = update(
            s,
            Action::FetchDone {
                query: LocationQuery::City("London".into()),
                result: Ok(report("London", "GB", UnitSystem::Metric)),
            },
        );
        assert!(effects.is_empty());
        assert!(!s.loading);
        assert_eq!(s.notice, None);
        assert_eq!(s.current_key().as_deref(), Some("London, GB"));
    }

    #[test]
    fn failed_city_fetch_shows_not_found_but_keeps_last_report() {
        let s = with_report("London", "GB");
        let (s, _) = update(
            s,
            Action::FetchDone {
                query: LocationQuery::City("Atlantis".into()),
                result: Err(skydeck_core::WeatherError::LocationNotFound("Atlantis".into()).into()),
            },
        );
        assert_eq!(s.notice, Some(Notice::CityNotFound));
        assert!(s.report.is_some());
    }

    #[test]
    fn failed_coordinate_fetch_shows_location_notice() {
        let (s, _) = update(
            state(),
            Action::FetchDone {
                query: LocationQuery::Coordinates(Coordinates {
                    latitude: 0.0,
                    longitude: 0.0,
                }),
                result: Err(skydeck_core::NetworkError::Timeout.into()),
            },
        );
        assert_eq!(s.notice, Some(Notice::LocationWeatherFailed));
    }

    #[test]
    fn unit_toggle_without_report_only_flips_unit() {
        let (s, effects) = update(state(), Action::ToggleUnit);
        assert_eq!(s.unit, UnitSystem::Imperial);
        assert!(effects.is_empty());
        assert!(!s.loading);
    }

    #[test]
    fn unit_toggle_twice_restores_unit_and_refetches_each_time() {
        let s = with_report("London", "GB");

        let (s, first) = update(s, Action::ToggleUnit);
        assert_eq!(first, vec![city_fetch("London", UnitSystem::Imperial)]);

        let (s, second) = update(s, Action::ToggleUnit);
        assert_eq!(s.unit, UnitSystem::Metric);
        assert_eq!(second, vec![city_fetch("London", UnitSystem::Metric)]);
    }

    #[test]
    fn locate_flow() {
        let (s, effects) = update(state(), Action::Locate);
        assert!(s.loading);
        assert_eq!(effects, vec![Effect::Locate]);

        let coords = Coordinates {
            latitude: 47.37,
            longitude: 8.54,
        };
        let (s, effects) = update(s, Action::Located(Ok(coords)));
        assert!(s.loading);
        assert_eq!(
            effects,
            vec![Effect::Fetch {
                query: LocationQuery::Coordinates(coords),
                unit: UnitSystem::Metric,
            }]
        );
    }

    #[test]
    fn locate_failures_map_to_notices() {
        let (s, _) = update(state(), Action::Located(Err(LocationError::Unsupported)));
        assert_eq!(s.notice, Some(Notice::GeolocationUnsupported));

        let (s, _) = update(state(), Action::Located(Err(LocationError::PermissionDenied)));
        assert_eq!(s.notice, Some(Notice::GeolocationUnavailable));
        assert!(!s.loading);
    }

    #[test]
    fn toggle_favorite_adds_then_removes_current_city() {
        let s = with_report("London", "GB");

        let (s, effects) = update(s, Action::ToggleFavorite);
        assert!(s.is_current_favorite());
        assert_eq!(
            effects,
            vec![Effect::PersistFavorites(Favorites::from_entries(["London, GB"]))]
        );

        let (s, _) = update(s, Action::ToggleFavorite);
        assert!(!s.is_current_favorite());
        assert!(s.favorites.is_empty());
    }

    #[test]
    fn toggle_favorite_without_report_is_noop() {
        let (s, effects) = update(state(), Action::ToggleFavorite);
        assert!(effects.is_empty());
        assert!(s.favorites.is_empty());
    }

    #[test]
    fn remove_favorite_out_of_range_is_noop() {
        let mut s = state();
        s.favorites.add("Oslo, NO");
        let (s, effects) = update(s, Action::RemoveFavorite(3));
        assert!(effects.is_empty());
        assert_eq!(s.favorites.len(), 1);

        let (s, effects) = update(s, Action::RemoveFavorite(0));
        assert_eq!(effects, vec![Effect::PersistFavorites(Favorites::new())]);
        assert!(s.favorites.is_empty());
    }

    #[test]
    fn open_favorite_searches_city_part() {
        let mut s = state();
        s.favorites.add("New York, US");
        let (_, effects) = update(s, Action::OpenFavorite(0));
        assert_eq!(effects, vec![city_fetch("New York", UnitSystem::Metric)]);
    }

    #[test]
    fn open_popular_searches_city() {
        let (_, effects) = update(state(), Action::OpenPopular(1));
        assert_eq!(effects, vec![city_fetch("Tokyo", UnitSystem::Metric)]);

        let (_, effects) = update(state(), Action::OpenPopular(9));
        assert!(effects.is_empty());
    }

    #[test]
    fn theme_toggle_persists() {
        let (s, effects) = update(state(), Action::ToggleTheme);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(effects, vec![Effect::PersistTheme(Theme::Dark)]);
    }

    #[test]
    fn dismiss_clears_notice() {
        let mut s = state();
        s.notice = Some(Notice::CityNotFound);
        let (s, _) = update(s, Action::DismissNotice);
        assert_eq!(s.notice, None);
    }
}
