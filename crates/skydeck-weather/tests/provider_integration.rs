//! Integration tests for WeatherProvider and IpLocator using wiremock.

use std::time::Duration;

use skydeck_weather::{
    daily_summaries, Coordinates, IpLocator, LocationError, LocationQuery, ProviderError,
    UnitSystem, WeatherCondition, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.3488, "lat": 48.8534},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 60, "pressure": 1020},
        "visibility": 10000,
        "wind": {"speed": 3.0},
        "dt": 1_760_000_000,
        "sys": {"country": "FR"},
        "name": "Paris"
    })
}

fn forecast_entry(dt: i64, temp: f64, main: &str) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": {"temp": temp},
        "weather": [{"main": main, "description": main.to_lowercase(), "icon": "02d"}]
    })
}

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new("test-key", server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_city_with_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    // 2026-01-01 00:00 UTC and the following samples.
    let base = 1_767_225_600;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cnt": 3,
            "list": [
                forecast_entry(base + 9 * 3600, 5.0, "Clear"),
                forecast_entry(base + 12 * 3600, 9.0, "Clouds"),
                forecast_entry(base + 25 * 3600, -2.0, "Snow"),
            ]
        })))
        .mount(&server)
        .await;

    let report = provider(&server)
        .fetch(&LocationQuery::City("Paris".to_string()), UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(report.current.display_name(), "Paris, FR");
    assert_eq!(report.current.sky.condition, WeatherCondition::Clear);
    assert_eq!(report.unit, UnitSystem::Metric);

    let samples = report.forecast.unwrap();
    assert_eq!(samples.len(), 3);

    let days = daily_summaries(&samples, &chrono::Utc);
    assert_eq!(days.len(), 2);
    assert_eq!((days[0].min, days[0].max), (5.0, 9.0));
    assert_eq!((days[1].min, days[1].max), (-2.0, -2.0));
}

#[tokio::test]
async fn test_fetch_by_coordinates_imperial() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"list": []})))
        .mount(&server)
        .await;

    let query = LocationQuery::Coordinates(Coordinates {
        latitude: 48.85,
        longitude: 2.35,
    });
    let report = provider(&server)
        .fetch(&query, UnitSystem::Imperial)
        .await
        .unwrap();

    assert_eq!(report.unit, UnitSystem::Imperial);
    assert_eq!(report.forecast, Some(Vec::new()));
}

#[tokio::test]
async fn test_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let result = provider(&server)
        .fetch(&LocationQuery::City("Atlantis".to_string()), UnitSystem::Metric)
        .await;

    match result {
        Err(ProviderError::NotFound(q)) => assert_eq!(q, "Atlantis"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let result = provider(&server)
        .fetch_current(&LocationQuery::City("Paris".to_string()), UnitSystem::Metric)
        .await;

    assert!(matches!(result, Err(ProviderError::Unauthorized)));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = provider(&server)
        .fetch_current(&LocationQuery::City("Paris".to_string()), UnitSystem::Metric)
        .await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_forecast_failure_degrades_to_current_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let report = provider(&server)
        .fetch(&LocationQuery::City("Paris".to_string()), UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(report.current.location_name, "Paris");
    assert!(report.forecast.is_none());
}

#[tokio::test]
async fn test_malformed_forecast_degrades_to_current_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [{"dt": 1, "main": {"temp": 1.0}, "weather": []}]
        })))
        .mount(&server)
        .await;

    let report = provider(&server)
        .fetch(&LocationQuery::City("Paris".to_string()), UnitSystem::Metric)
        .await
        .unwrap();

    assert!(report.forecast.is_none());
}

#[tokio::test]
async fn test_locate_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "city": "Zurich",
            "lat": 47.37,
            "lon": 8.54
        })))
        .mount(&server)
        .await;

    let locator =
        IpLocator::new(format!("{}/json", server.uri()), Duration::from_secs(5)).unwrap();
    let location = locator.locate().await.unwrap();

    assert_eq!(location.coordinates.latitude, 47.37);
    assert_eq!(location.coordinates.longitude, 8.54);
    assert_eq!(location.city_name.as_deref(), Some("Zurich"));
}

#[tokio::test]
async fn test_locate_fail_status_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let locator =
        IpLocator::new(format!("{}/json", server.uri()), Duration::from_secs(5)).unwrap();

    assert!(matches!(
        locator.locate().await,
        Err(LocationError::ServiceUnavailable)
    ));
}

#[tokio::test]
async fn test_locate_forbidden_is_permission_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let locator =
        IpLocator::new(format!("{}/json", server.uri()), Duration::from_secs(5)).unwrap();

    assert!(matches!(
        locator.locate().await,
        Err(LocationError::PermissionDenied)
    ));
}
