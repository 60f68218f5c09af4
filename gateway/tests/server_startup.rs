//! Server Startup Tests
//!
//! Tests for application state construction and the assembled router, using
//! the real recognizer factory. Recognition traffic goes to a local wiremock
//! server instead of Google.

use std::io::Cursor;

use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voxname_gateway::{ServerConfig, create_recognizer, routes, state::AppState};

const BOUNDARY: &str = "startup-test-boundary";

/// Helper function to create a minimal test configuration
fn create_minimal_config(temp_dir: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.temp_dir = temp_dir.path().join("uploads");
    config
}

fn full_router(state: std::sync::Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(
            "/",
            axum::routing::get(voxname_gateway::handlers::api::health_check),
        )
        .merge(routes::api::create_api_router(max_upload_bytes))
        .with_state(state)
}

fn wav_upload_body() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..1600 {
            writer.write_sample(1000i16).unwrap();
            writer.write_sample(3000i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    let wav = cursor.into_inner();

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"audio\"; filename=\"name.wav\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(&wav);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Test that the state can be built with defaults (no API key configured)
#[tokio::test]
async fn test_minimal_config_boot() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_minimal_config(&temp_dir);
    let app_state = AppState::new(config).await.unwrap();

    let app = full_router(app_state, 1024 * 1024);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "OK"}));
}

/// Test that the temp directory is created while building the state
#[tokio::test]
async fn test_temp_dir_created_on_startup() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_minimal_config(&temp_dir);
    config.temp_dir = temp_dir.path().join("nested").join("uploads");
    let expected = config.temp_dir.clone();
    assert!(!expected.exists());

    let app_state = AppState::new(config).await.unwrap();

    assert!(expected.is_dir());
    assert_eq!(app_state.temp_dir, expected);

    // Building a second state over an existing directory is fine
    let mut config = create_minimal_config(&temp_dir);
    config.temp_dir = expected.clone();
    assert!(AppState::new(config).await.is_ok());
}

/// Test that an unknown provider fails at startup, not on first request
#[tokio::test]
async fn test_unknown_provider_fails_startup() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_minimal_config(&temp_dir);
    config.recognizer.provider = "carrier-pigeon".to_string();

    assert!(AppState::new(config).await.is_err());
}

#[test]
fn test_default_recognizer_is_google() {
    let config = ServerConfig::default();
    let recognizer = create_recognizer(&config.recognizer).unwrap();
    assert_eq!(recognizer.provider_info(), "Google Web Speech API v2");
}

/// Full request path: multipart upload, WAV decode, Google wire format, name formatting
#[tokio::test]
async fn test_end_to_end_with_mock_google() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/speech-api/v2/recognize"))
        .and(query_param("client", "chromium"))
        .and(query_param("lang", "en-GB"))
        .and(query_param("key", "integration-key"))
        .and(header("content-type", "audio/l16; rate=16000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "{\"result\":[]}\n\
             {\"result\":[{\"alternative\":[\
             {\"transcript\":\"my name is priya sharma\",\"confidence\":0.93},\
             {\"transcript\":\"my name is priya charma\"}],\"final\":true}],\"result_index\":0}\n",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = create_minimal_config(&temp_dir);
    config.recognizer.api_key = Some("integration-key".to_string());
    config.recognizer.endpoint = Some(format!("{}/speech-api/v2/recognize", server.uri()));
    config.recognizer.language = "en-GB".to_string();
    let uploads = config.temp_dir.clone();

    let app_state = AppState::new(config).await.unwrap();
    let app = full_router(app_state, 1024 * 1024);

    let request = Request::builder()
        .method("POST")
        .uri("/recognize")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(wav_upload_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "success": true,
            "text": "Priya Sharma",
            "original_text": "my name is priya sharma"
        })
    );

    // Stereo input is downmixed before upload: 1600 mono frames of 2000
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body.len(), 1600 * 2);
    assert_eq!(&requests[0].body[..2], &2000i16.to_le_bytes());

    assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);
}

/// Google rejecting the request surfaces as 503 with the upstream reason
#[tokio::test]
async fn test_end_to_end_service_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/speech-api/v2/recognize"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = create_minimal_config(&temp_dir);
    config.recognizer.endpoint = Some(format!("{}/speech-api/v2/recognize", server.uri()));

    let app_state = AppState::new(config).await.unwrap();
    let app = full_router(app_state, 1024 * 1024);

    let request = Request::builder()
        .method("POST")
        .uri("/recognize")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(wav_upload_body()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Service unavailable: recognition request failed: Forbidden"
        })
    );
}
