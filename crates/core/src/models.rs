use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SkillError;

pub const ENVELOPE_VERSION: &str = "1.0";
pub const LAUNCH_REQUEST_TYPE: &str = "LaunchRequest";
pub const INTENT_REQUEST_TYPE: &str = "IntentRequest";

/// Inbound event as delivered by the voice platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvent {
    pub request: SkillRequest,
    pub session: Session,
}

impl SkillEvent {
    pub fn from_json(input: &str) -> Result<Self, SkillError> {
        serde_json::from_str(input).map_err(|error| SkillError::malformed(error.to_string()))
    }

    pub fn from_slice(input: &[u8]) -> Result<Self, SkillError> {
        serde_json::from_slice(input).map_err(|error| SkillError::malformed(error.to_string()))
    }

    pub fn launch(session_id: impl Into<String>) -> Self {
        Self {
            request: SkillRequest {
                request_type: Some(LAUNCH_REQUEST_TYPE.to_string()),
                request_id: None,
                intent: None,
            },
            session: Session::new(session_id),
        }
    }

    pub fn intent(session_id: impl Into<String>, intent_name: impl Into<String>) -> Self {
        Self {
            request: SkillRequest {
                request_type: Some(INTENT_REQUEST_TYPE.to_string()),
                request_id: None,
                intent: Some(IntentSlot {
                    name: Some(intent_name.into()),
                }),
            },
            session: Session::new(session_id),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request.request_id = Some(request_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(rename = "type")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentSlot>,
}

impl SkillRequest {
    /// Request type tag; absent or blank tags are rejected.
    pub fn kind(&self) -> Result<&str, SkillError> {
        match self.request_type.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => Ok(kind),
            _ => Err(SkillError::malformed("request.type is required")),
        }
    }

    pub fn is_launch(&self) -> bool {
        self.request_type.as_deref() == Some(LAUNCH_REQUEST_TYPE)
    }

    pub fn intent_name(&self) -> Result<&str, SkillError> {
        match self
            .intent
            .as_ref()
            .and_then(|intent| intent.name.as_deref())
        {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(SkillError::malformed("request.intent.name is required")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentSlot {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            application: None,
            attributes: Map::new(),
        }
    }

    pub fn id(&self) -> Result<&str, SkillError> {
        match self.session_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(SkillError::malformed("session.sessionId is required")),
        }
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application
            .as_ref()
            .map(|application| application.application_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: SpeechletResponse,
}

impl ResponseEnvelope {
    pub fn new(speechlet: SpeechletResponse) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: speechlet,
        }
    }

    pub fn title(&self) -> &str {
        &self.response.card.title
    }

    pub fn ssml(&self) -> &str {
        &self.response.output_speech.ssml
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: SsmlSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

impl SpeechletResponse {
    pub fn new(
        title: &str,
        output: &str,
        reprompt_text: Option<String>,
        should_end_session: bool,
    ) -> Self {
        Self {
            output_speech: SsmlSpeech {
                kind: "SSML".to_string(),
                ssml: output.to_string(),
            },
            card: Card {
                kind: "Simple".to_string(),
                title: title.to_string(),
                content: output.to_string(),
            },
            reprompt: Reprompt {
                output_speech: PlainTextSpeech {
                    kind: "PlainText".to_string(),
                    text: reprompt_text,
                },
            },
            should_end_session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsmlSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: PlainTextSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainTextSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}
