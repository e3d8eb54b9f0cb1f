use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use factbox_core::{IntentRouter, ResponseCatalog, ResponseEnvelope, SkillError, SkillEvent};
use factbox_observability::AppMetrics;
use tracing::{info, instrument, warn};

/// Entry point shared by the HTTP host and the CLI.
#[derive(Clone)]
pub struct SkillService {
    router: IntentRouter,
    metrics: Arc<AppMetrics>,
}

impl SkillService {
    pub fn new(catalog: ResponseCatalog, metrics: Arc<AppMetrics>) -> Self {
        Self {
            router: IntentRouter::new(Arc::new(catalog)),
            metrics,
        }
    }

    /// Loads the catalog from `catalog_path` when given, else the built-in one.
    pub fn load(catalog_path: Option<&Path>, metrics: Arc<AppMetrics>) -> Result<Self> {
        let catalog = match catalog_path {
            Some(path) => ResponseCatalog::from_json_file(path)
                .with_context(|| format!("failed loading catalog from {}", path.display()))?,
            None => ResponseCatalog::builtin(),
        };

        info!(
            entries = catalog.len(),
            source = %catalog_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "builtin".to_string()),
            "response catalog ready"
        );

        Ok(Self::new(catalog, metrics))
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        self.router.catalog()
    }

    pub fn intents(&self) -> Vec<String> {
        self.catalog().names().map(ToString::to_string).collect()
    }

    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub fn handle_json(&self, body: &[u8]) -> Result<ResponseEnvelope, SkillError> {
        match SkillEvent::from_slice(body) {
            Ok(event) => self.handle_event(&event),
            Err(error) => {
                self.metrics.inc_request();
                self.record_failure(&error);
                Err(error)
            }
        }
    }

    #[instrument(skip(self, event))]
    pub fn handle_event(&self, event: &SkillEvent) -> Result<ResponseEnvelope, SkillError> {
        let started = Instant::now();
        self.metrics.inc_request();

        info!(
            application_id = event.session.application_id().unwrap_or("-"),
            "event received"
        );

        let result = self.router.route_event(event);
        self.metrics.observe_latency(started.elapsed());

        match &result {
            Ok(envelope) => {
                self.metrics.inc_routed();
                info!(
                    title = envelope.title(),
                    should_end_session = envelope.should_end_session(),
                    "event routed"
                );
            }
            Err(error) => self.record_failure(error),
        }

        result
    }

    fn record_failure(&self, error: &SkillError) {
        match error {
            SkillError::MalformedRequest(_) => self.metrics.inc_malformed(),
            SkillError::NoHandler { .. } => self.metrics.inc_lookup_miss(),
        }
        warn!(error = %error, code = error.code(), "event rejected");
    }
}
