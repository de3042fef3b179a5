//! Integration tests for WeatherApiProvider and WeatherService using wiremock.

use std::{sync::Arc, time::Duration};

use weather_core::{
    ClientSettings, UpstreamError, WeatherApiProvider, WeatherCache, WeatherProvider,
    WeatherService, resolve,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "Integration City", "country": "Nowhere" },
        "current": {
            "temp_c": 22.0,
            "temp_f": 71.6,
            "condition": { "text": "Sunny", "icon": "//test.com/sun.png", "code": 1000 },
            "last_updated": "2024-01-01 12:00",
            "humidity": 50,
            "wind_kph": 15.0
        }
    })
}

fn astronomy_body() -> serde_json::Value {
    serde_json::json!({
        "astronomy": { "astro": { "sunrise": "06:15 AM", "sunset": "08:30 PM" } }
    })
}

fn provider(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(ClientSettings::new(Some("test-key".into()), server.uri())).unwrap()
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_current_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Integration City"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = provider(&server).fetch_current(&resolve(Some("Integration City"))).await.unwrap();

    assert_eq!(payload.location.name.as_deref(), Some("Integration City"));
    assert_eq!(payload.current.temp_c, Some(22.0));
    assert_eq!(payload.current.condition.text.as_deref(), Some("Sunny"));
}

#[tokio::test]
async fn query_with_spaces_and_accents_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/astronomy.json"))
        .and(query_param("q", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(astronomy_body()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = provider(&server).fetch_astronomy(&resolve(Some("São Paulo"))).await.unwrap();

    assert_eq!(payload.astronomy.astro.sunset.as_deref(), Some("08:30 PM"));
}

#[tokio::test]
async fn forbidden_maps_to_credentials_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "current.json",
        ResponseTemplate::new(403).set_body_json(serde_json::json!({ "error": "Quota exceeded" })),
    )
    .await;

    let err = provider(&server).fetch_current(&resolve(Some("Test"))).await.unwrap_err();

    assert_eq!(err, UpstreamError::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid API key or quota exceeded");
}

#[tokio::test]
async fn server_error_includes_status() {
    let server = MockServer::start().await;
    mount(&server, "current.json", ResponseTemplate::new(500)).await;

    let err = provider(&server).fetch_current(&resolve(Some("Test"))).await.unwrap_err();

    assert_eq!(err, UpstreamError::Status(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn invalid_json_is_reported() {
    let server = MockServer::start().await;
    mount(&server, "current.json", ResponseTemplate::new(200).set_body_string("invalid json"))
        .await;

    let err = provider(&server).fetch_current(&resolve(Some("Test"))).await.unwrap_err();

    assert_eq!(err, UpstreamError::InvalidResponse);
    assert!(err.to_string().contains("Invalid response"));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind and drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let provider = WeatherApiProvider::new(ClientSettings::new(
        Some("test-key".into()),
        format!("http://127.0.0.1:{port}"),
    ))
    .unwrap();

    let err = provider.fetch_current(&resolve(Some("Test"))).await.unwrap_err();

    assert_eq!(err, UpstreamError::Network);
    assert!(err.to_string().contains("Network error"));
}

#[tokio::test]
async fn hung_upstream_times_out_as_network_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "current.json",
        ResponseTemplate::new(200)
            .set_body_json(current_body())
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let mut settings = ClientSettings::new(Some("test-key".into()), server.uri());
    settings.timeout = Duration::from_millis(200);
    let provider = WeatherApiProvider::new(settings).unwrap();

    let err = provider.fetch_current(&resolve(Some("Test"))).await.unwrap_err();

    assert_eq!(err, UpstreamError::Network);
}

#[tokio::test]
async fn service_merges_and_caches_upstream_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/astronomy.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(astronomy_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::new(
        Arc::new(provider(&server)),
        Arc::new(WeatherCache::new()),
        chrono::Duration::minutes(15),
    );

    let first = service.get_weather(Some("Integration City")).await;
    let second = service.get_weather(Some("Integration City")).await;

    assert!(first.success);
    assert_eq!(first.location, "Integration City");
    assert_eq!(first.temp_f, Some(71.6));
    assert_eq!(first.humidity, Some(50));
    assert_eq!(first.sunrise.as_deref(), Some("06:15 AM"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn service_reports_partial_failure() {
    let server = MockServer::start().await;
    mount(&server, "current.json", ResponseTemplate::new(200).set_body_json(current_body())).await;
    mount(&server, "astronomy.json", ResponseTemplate::new(500)).await;

    let service = WeatherService::new(
        Arc::new(provider(&server)),
        Arc::new(WeatherCache::new()),
        chrono::Duration::minutes(15),
    );

    let report = service.get_weather(Some("Partial Failure City")).await;

    assert!(!report.success);
    assert_eq!(report.location, "Partial Failure City");
    assert_eq!(report.error.as_deref(), Some("Weather API error: 500"));
    assert_eq!(report.temp_c, None);
}

#[tokio::test]
async fn service_without_key_degrades_to_failed_report() {
    let server = MockServer::start().await;
    mount(&server, "current.json", ResponseTemplate::new(200).set_body_json(current_body()))
        .await;

    let provider =
        WeatherApiProvider::new(ClientSettings::new(None, server.uri())).unwrap();
    let service = WeatherService::new(
        Arc::new(provider),
        Arc::new(WeatherCache::new()),
        chrono::Duration::minutes(15),
    );

    let report = service.get_weather(Some("London")).await;

    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("API key not configured"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
