//! End-to-end request → verdict scenarios through the HTTP router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cyclone_risk::config::{ServerConfig, UpstreamConfig};
use cyclone_risk::data::open_meteo::OpenMeteoClient;
use cyclone_risk::data::WeatherSource;
use cyclone_risk::engine::RiskService;
use cyclone_risk::risk::{RiskEvaluator, RiskThresholds};
use cyclone_risk::server::{build_router, routes::ServerState};
use cyclone_risk::types::{Coordinate, Locale};

use crate::stub_source::StubSource;

fn router(source: impl WeatherSource + 'static, locale: Locale) -> Router {
    let source: Arc<dyn WeatherSource> = Arc::new(source);
    let evaluator = RiskEvaluator::new(RiskThresholds::default(), locale);
    let state = Arc::new(ServerState::new(RiskService::new(source, evaluator)));
    build_router(state, &ServerConfig::default())
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cyclone-risk")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn high_risk_with_trailing_nulls() {
    let source = StubSource::with_series(
        json!({
            "wind_speed_10m": [110.0, 150.0, null, null],
            "pressure_msl": [995.0, 990.0, null, null],
            "relative_humidity_2m": [90.0, null],
        }),
        json!({ "wave_height": [7.0, 8.0, null] }),
    );
    let (status, body) = post(router(source, Locale::En), json!({ "latitude": 13.37, "longitude": -59.5 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "High");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Wind speed: 150.0 km/h"));
    assert!(message.contains("Pressure: 990 hPa"));
    assert!(message.contains("Waves: 8.0 m"));
    assert!(message.contains("extreme wind, low pressure, dangerous waves"));
}

#[tokio::test]
async fn moderate_when_only_wind_is_notable() {
    let source = StubSource::with_series(
        json!({ "wind_speed_10m": [95.0], "pressure_msl": [1005.0] }),
        json!({}),
    );
    let (status, body) = post(router(source, Locale::En), json!({ "latitude": 20, "longitude": -70 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "Moderate");
    assert_eq!(body["message"], "Notable conditions. Wind speed: 95.0 km/h, Waves: 0.0 m.");
}

#[tokio::test]
async fn indeterminate_without_wind() {
    let source = StubSource::with_series(json!({ "pressure_msl": [1015.0] }), json!({}));
    let (status, body) = post(router(source, Locale::En), json!({ "latitude": 0, "longitude": 0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "Indeterminate");
    assert_eq!(body["message"], "insufficient wind/pressure data for evaluation");
}

#[tokio::test]
async fn degenerate_payloads_never_fail() {
    let source = StubSource::with_payloads(json!("unexpected"), json!({ "hourly": 42 }));
    let (status, body) = post(router(source, Locale::Fr), json!({ "latitude": 5, "longitude": 5 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "Indéterminé");
}

#[tokio::test]
async fn numeric_string_coordinates_reach_the_source() {
    let source = StubSource::with_series(
        json!({ "wind_speed_10m": [30.0], "pressure_msl": [1015.0] }),
        json!({}),
    );
    let calls = source.calls();
    let (status, body) = post(
        router(source, Locale::En),
        json!({ "latitude": "48.85", "longitude": "2.35" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "Low");
    assert_eq!(*calls.lock().unwrap(), vec![Coordinate::new(48.85, 2.35)]);
}

#[tokio::test]
async fn invalid_request_never_reaches_the_source() {
    let source = StubSource::network_error("should not be called");
    let calls = source.calls();
    let (status, body) = post(router(source, Locale::En), json!({ "lat": 1, "lon": 2 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failures_map_to_error_verdicts() {
    let (status, body) = post(
        router(StubSource::network_error("timed out"), Locale::En),
        json!({ "latitude": 1, "longitude": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["risk"], "Error");

    let (status, body) = post(
        router(StubSource::invalid_data("empty body"), Locale::Fr),
        json!({ "latitude": 1, "longitude": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["risk"], "Erreur");
    assert!(body["message"].as_str().unwrap().contains("empty body"));
}

#[tokio::test]
async fn open_meteo_client_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": {
                "time": ["2026-10-18T00:00", "2026-10-18T01:00", "2026-10-18T02:00"],
                "wind_speed_10m": [100.0, 125.5, null],
                "pressure_msl": [1001.0, 998.4, null],
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/marine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hourly": { "wave_height": [3.0, null, null] }
        })))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(UpstreamConfig {
        atmospheric_url: format!("{}/v1/forecast", server.uri()),
        marine_url: format!("{}/v1/marine", server.uri()),
        ..UpstreamConfig::default()
    })
    .unwrap();

    let (status, body) = post(router(client, Locale::En), json!({ "latitude": 13.37, "longitude": -59.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "High");
    assert_eq!(
        body["message"],
        "HIGH cyclone risk. Wind speed: 125.5 km/h, Pressure: 998 hPa, Waves: 3.0 m. \
         Factors: extreme wind, low pressure."
    );
}

#[tokio::test]
async fn open_meteo_server_error_is_503() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(UpstreamConfig {
        atmospheric_url: format!("{}/v1/forecast", server.uri()),
        marine_url: format!("{}/v1/marine", server.uri()),
        ..UpstreamConfig::default()
    })
    .unwrap();

    let (status, body) = post(router(client, Locale::En), json!({ "latitude": 1, "longitude": 2 })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["risk"], "Error");
}
