use crate::error::SkillError;
use crate::models::SkillRequest;

pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// Catalog names the router synthesizes from platform requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedIntent {
    Launch,
    Help,
    End,
}

impl ReservedIntent {
    pub const ALL: [Self; 3] = [Self::Launch, Self::Help, Self::End];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Help => "help",
            Self::End => "end",
        }
    }

    /// Platform constants are matched case-sensitively.
    pub fn from_platform_name(name: &str) -> Option<Self> {
        match name {
            HELP_INTENT => Some(Self::Help),
            CANCEL_INTENT | STOP_INTENT => Some(Self::End),
            _ => None,
        }
    }

    pub fn keeps_session_open(self) -> bool {
        matches!(self, Self::Launch | Self::Help)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIntent {
    pub name: String,
    pub should_end_session: bool,
}

impl NormalizedIntent {
    fn reserved(intent: ReservedIntent) -> Self {
        Self {
            name: intent.as_str().to_string(),
            should_end_session: !intent.keeps_session_open(),
        }
    }

    fn custom(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            should_end_session: true,
        }
    }
}

pub fn normalize_intent(request: &SkillRequest) -> Result<NormalizedIntent, SkillError> {
    request.kind()?;

    if request.is_launch() {
        return Ok(NormalizedIntent::reserved(ReservedIntent::Launch));
    }

    let name = request.intent_name()?;
    Ok(match ReservedIntent::from_platform_name(name) {
        Some(reserved) => NormalizedIntent::reserved(reserved),
        None => NormalizedIntent::custom(name),
    })
}
