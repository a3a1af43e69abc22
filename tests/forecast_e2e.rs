use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, routing::post, Json, Router};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use forecast_relay::completion::OpenAiClient;
use forecast_relay::config::ResponseMode;
use forecast_relay::prompt::PromptTemplate;
use forecast_relay::{build_app, AppState};

async fn mock_openai() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "choices": [
            {
                "message": {
                    "role": "assistant",
                    "content": "location: Paris\ntemperature: 18C\ncondition: Cloudy"
                }
            }
        ]
    }))
}

async fn spawn_mock_openai_server() -> String {
    let app = Router::new().route("/v1/chat/completions", post(mock_openai));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn build_test_app(base_url: &str, mode: ResponseMode) -> Router {
    let client = OpenAiClient::new("test-key", "gpt-4", base_url, Duration::from_secs(5));
    let template = PromptTemplate::forecast().unwrap();
    build_app(AppState::new(Arc::new(client), template, mode))
}

fn forecast_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/forecast")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn e2e_structured_forecast_for_paris() {
    let base_url = spawn_mock_openai_server().await;
    let app = build_test_app(&base_url, ResponseMode::Structured);

    let response = app
        .oneshot(forecast_request(r#"{"location":"Paris"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        &body[..],
        br#"{"result":{"location":"Paris","temperature":"18C","condition":"Cloudy"}}"#
    );
}

#[tokio::test]
async fn e2e_raw_mode_returns_completion_text() {
    let base_url = spawn_mock_openai_server().await;
    let app = build_test_app(&base_url, ResponseMode::Raw);

    let response = app
        .oneshot(forecast_request(r#"{"location":"Paris"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        &body[..],
        br#"{"result":"location: Paris\ntemperature: 18C\ncondition: Cloudy"}"#
    );
}

#[tokio::test]
async fn e2e_missing_location_returns_400() {
    let base_url = spawn_mock_openai_server().await;
    let app = build_test_app(&base_url, ResponseMode::Structured);

    let response = app.oneshot(forecast_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        &body[..],
        br#"{"error":"Please provide a location in the request body."}"#
    );
}

#[tokio::test]
async fn e2e_unreachable_upstream_returns_generic_500() {
    let app = build_test_app("http://127.0.0.1:1", ResponseMode::Structured);

    let response = app
        .oneshot(forecast_request(r#"{"location":"Paris"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#"{"error":"Internal Server Error"}"#);
}

#[tokio::test]
async fn e2e_unknown_route_returns_404() {
    let app = build_test_app("http://127.0.0.1:1", ResponseMode::Structured);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
