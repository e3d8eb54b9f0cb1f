use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use factbox_api::{build_app, ApiConfig};
use factbox_core::ResponseEnvelope;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_app(&ApiConfig::default()).expect("app should build")
}

fn skill_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/skill")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn intent_event(name: &str) -> Value {
    json!({
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.test",
            "intent": { "name": name }
        },
        "session": {
            "sessionId": "amzn1.echo-api.session.test",
            "application": { "applicationId": "amzn1.ask.skill.test" }
        }
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let parsed = read_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["catalog_entries"], 6);
}

#[tokio::test]
async fn launch_request_keeps_session_open() {
    let response = app()
        .oneshot(skill_request(json!({
            "request": { "type": "LaunchRequest", "requestId": "r1" },
            "session": { "sessionId": "s1", "application": { "applicationId": "a1" } }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["version"], "1.0");
    assert_eq!(parsed["sessionAttributes"], json!({}));
    assert_eq!(parsed["response"]["card"]["title"], "launch");
    assert_eq!(parsed["response"]["shouldEndSession"], false);
    assert_eq!(parsed["response"]["reprompt"]["outputSpeech"]["text"], Value::Null);
}

#[tokio::test]
async fn help_intent_keeps_session_open() {
    let response = app()
        .oneshot(skill_request(intent_event("AMAZON.HelpIntent")))
        .await
        .unwrap();

    let parsed = read_json(response).await;
    assert_eq!(parsed["response"]["card"]["title"], "help");
    assert_eq!(parsed["response"]["shouldEndSession"], false);
}

#[tokio::test]
async fn stop_intent_ends_session() {
    let response = app()
        .oneshot(skill_request(intent_event("AMAZON.StopIntent")))
        .await
        .unwrap();

    let parsed = read_json(response).await;
    assert_eq!(parsed["response"]["card"]["title"], "end");
    assert_eq!(parsed["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn about_intent_returns_fixed_text() {
    let response = app()
        .oneshot(skill_request(intent_event("About")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let envelope: ResponseEnvelope = serde_json::from_slice(&body).unwrap();

    assert_eq!(envelope.title(), "about");
    assert!(envelope.should_end_session());
    assert!(envelope.ssml().starts_with("<speak>Welcome to ACME Inc."));
    assert_eq!(envelope.response.card.content, envelope.ssml());
    assert_eq!(envelope.response.output_speech.kind, "SSML");
}

#[tokio::test]
async fn unknown_intent_is_not_found() {
    let response = app()
        .oneshot(skill_request(intent_event("Unknown")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "no_handler");
}

#[tokio::test]
async fn missing_session_id_is_bad_request() {
    let response = app()
        .oneshot(skill_request(json!({
            "request": { "type": "IntentRequest", "intent": { "name": "About" } },
            "session": { "application": { "applicationId": "a1" } }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = read_json(response).await;
    assert_eq!(parsed["error"], "malformed_request");
}

#[tokio::test]
async fn identical_events_produce_identical_bodies() {
    let app = app();
    let first = app
        .clone()
        .oneshot(skill_request(intent_event("Contact")))
        .await
        .unwrap();
    let second = app
        .oneshot(skill_request(intent_event("Contact")))
        .await
        .unwrap();

    let first = to_bytes(first.into_body(), usize::MAX).await.unwrap();
    let second = to_bytes(second.into_body(), usize::MAX).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn json_catalog_replaces_builtin_entries() {
    let config = ApiConfig {
        catalog_path: Some(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalog/acme.json"),
        ),
        ..ApiConfig::default()
    };
    let app = build_app(&config).expect("app should build with json catalog");

    let intents = app
        .clone()
        .oneshot(Request::builder().uri("/v1/intents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let parsed = read_json(intents).await;
    assert_eq!(
        parsed["intents"],
        json!(["about", "contact", "end", "help", "hours", "launch", "upcoming"])
    );

    let response = app
        .oneshot(skill_request(intent_event("Hours")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let parsed = read_json(response).await;
    assert_eq!(parsed["response"]["card"]["title"], "hours");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ApiConfig {
        max_body_bytes: 32,
        ..ApiConfig::default()
    };
    let app = build_app(&config).expect("app should build");

    let response = app
        .oneshot(skill_request(intent_event("About")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
