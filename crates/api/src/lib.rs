use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use factbox_core::SkillError;
use factbox_observability::{AppMetrics, MetricsSnapshot};
use factbox_skill::SkillService;
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub catalog_path: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            catalog_path: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let bind = env::var("FACTBOX_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let catalog_path = env::var("FACTBOX_CATALOG")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let max_body_bytes = env::var("FACTBOX_MAX_BODY_BYTES")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            bind,
            catalog_path,
            max_body_bytes,
        }
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<SkillService>,
    pub metrics: Arc<AppMetrics>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    catalog_entries: usize,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Serialize)]
struct IntentsResponse {
    intents: Vec<String>,
}

pub fn build_app(config: &ApiConfig) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let service = SkillService::load(config.catalog_path.as_deref(), metrics.clone())?;

    let state = ApiState {
        service: Arc::new(service),
        metrics,
    };

    Ok(build_router(state, config.max_body_bytes))
}

pub fn build_router(state: ApiState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/skill", post(skill))
        .route("/v1/intents", get(intents))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        catalog_entries: state.service.catalog().len(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn intents(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(IntentsResponse {
            intents: state.service.intents(),
        }),
    )
}

async fn skill(State(state): State<ApiState>, body: Bytes) -> Response {
    match state.service.handle_json(&body) {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(error) => skill_error_response(&error),
    }
}

fn skill_error_response(error: &SkillError) -> Response {
    let status = match error {
        SkillError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        SkillError::NoHandler { .. } => StatusCode::NOT_FOUND,
    };

    (
        status,
        Json(serde_json::json!({
            "error": error.code(),
            "message": error.to_string()
        })),
    )
        .into_response()
}
