//! Integration tests driving the reqwest transport against a mock OpenUV server.

use std::sync::Arc;

use openuv_core::{FixedLocation, OpenUvApi, OpenUvClient, OpenUvError, ProtectionParams, UvParams};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenUvClient {
    let api = OpenUvApi::new().with_base_url(format!("{}/api/v1", server.uri()));
    OpenUvClient::with_api("fakeapikey", api)
}

#[tokio::test]
async fn test_real_time_uv_sends_token_and_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/uv"))
        .and(query_param("lat", "10"))
        .and(query_param("lng", "20"))
        .and(header("x-access-token", "fakeapikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {
                "uv": 10,
                "uv_time": "2022-01-01T12:00:00.000Z",
                "uv_max": 11.2,
                "safe_exposure_time": { "st1": 10, "st2": 12, "st3": 16, "st4": 20, "st5": 32, "st6": 60 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let res = client
        .get_real_time_uv(Some(&UvParams::at(10.0, 20.0)))
        .await
        .unwrap();

    assert_eq!(res.result.uv, 10.0);
    assert_eq!(res.result.uv_max, 11.2);
    assert_eq!(res.result.safe_exposure_time.st6, Some(60.0));
}

#[tokio::test]
async fn test_forecast_returns_points_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/forecast"))
        .and(header("x-access-token", "fakeapikey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [
                { "uv": 0.3, "uv_time": "2022-01-01T07:00:00.000Z", "azimuth": -1.9, "altitude": 0.05 },
                { "uv": 2.6, "uv_time": "2022-01-01T08:00:00.000Z", "azimuth": -1.6, "altitude": 0.31 },
                { "uv": 5.1, "uv_time": "2022-01-01T09:00:00.000Z", "azimuth": -1.2, "altitude": 0.55 }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let res = client
        .get_forecast(Some(&UvParams::at(10.0, 20.0)))
        .await
        .unwrap();

    let uvs: Vec<f64> = res.result.iter().map(|f| f.uv).collect();
    assert_eq!(uvs, vec![0.3, 2.6, 5.1]);
}

#[tokio::test]
async fn test_protection_window_forwards_thresholds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/protection"))
        .and(query_param("from", "2"))
        .and(query_param("to", "6"))
        .and(query_param("lat", "10"))
        .and(query_param("lng", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "from_time": "2022-01-01T09:50:00.000Z",
            "from_uv": 2.05,
            "to_time": null,
            "to_uv": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = ProtectionParams::new(UvParams::at(10.0, 20.0)).with_range(2.0, 6.0);
    let res = client.get_daily_protection_time(Some(&params)).await.unwrap();

    assert!(res.from_time.is_some());
    assert_eq!(res.to_time, None);
    assert!(!res.needs_protection());
}

#[tokio::test]
async fn test_forbidden_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/uv"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({ "error": "invalid key" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_real_time_uv(Some(&UvParams::at(10.0, 20.0)))
        .await
        .unwrap_err();

    match err {
        OpenUvError::Api {
            status,
            status_text,
            message,
        } => {
            assert_eq!(status, 403);
            assert_eq!(status_text, "Forbidden");
            assert_eq!(message, "invalid key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_html_error_page_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_forecast(Some(&UvParams::at(10.0, 20.0)))
        .await
        .unwrap_err();

    assert!(matches!(err, OpenUvError::Decode(_)));
}

#[tokio::test]
async fn test_geolocation_fallback_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/uv"))
        .and(query_param("lat", "52.5"))
        .and(query_param("lng", "13.4"))
        .and(query_param("alt", "34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": { "uv": 1.5 } })))
        .expect(1)
        .mount(&server)
        .await;

    let api = OpenUvApi::new()
        .with_base_url(format!("{}/api/v1", server.uri()))
        .with_geolocator(Arc::new(FixedLocation::new(52.5, 13.4, Some(34.0))));
    let res = api.get_real_time_uv("fakeapikey", None).await.unwrap();

    assert_eq!(res.result.uv, 1.5);
}

#[tokio::test]
async fn test_missing_coordinates_never_hit_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_real_time_uv(None).await.unwrap_err();

    assert!(err.is_configuration());
}
