use std::sync::Arc;

use tracing::info;

use crate::catalog::ResponseCatalog;
use crate::error::SkillError;
use crate::intent::normalize_intent;
use crate::models::{ResponseEnvelope, Session, SkillEvent, SkillRequest, SpeechletResponse};

#[derive(Debug, Clone)]
pub struct IntentRouter {
    catalog: Arc<ResponseCatalog>,
}

impl IntentRouter {
    pub fn new(catalog: Arc<ResponseCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    pub fn route(
        &self,
        request: &SkillRequest,
        session: &Session,
    ) -> Result<ResponseEnvelope, SkillError> {
        let session_id = session.id()?;
        let normalized = normalize_intent(request)?;

        info!(
            request_id = request.request_id.as_deref().unwrap_or("-"),
            session_id = session_id,
            intent = %normalized.name,
            "on_intent"
        );

        let handler =
            self.catalog
                .lookup(&normalized.name)
                .ok_or_else(|| SkillError::NoHandler {
                    intent: normalized.name.clone(),
                })?;
        let speech_output = handler.respond();

        Ok(ResponseEnvelope::new(SpeechletResponse::new(
            &normalized.name,
            &speech_output,
            None,
            normalized.should_end_session,
        )))
    }

    pub fn route_event(&self, event: &SkillEvent) -> Result<ResponseEnvelope, SkillError> {
        self.route(&event.request, &event.session)
    }
}
