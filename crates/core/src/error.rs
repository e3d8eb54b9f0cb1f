use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("no handler found for intent `{intent}`")]
    NoHandler { intent: String },
}

impl SkillError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedRequest(detail.into())
    }

    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "malformed_request",
            Self::NoHandler { .. } => "no_handler",
        }
    }
}
