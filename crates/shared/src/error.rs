use thiserror::Error;

/// Reasons an inbound backend message is dropped without touching panel state.
#[derive(Debug, Error)]
pub enum InboundError {
    #[error("malformed message json: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("message is not a json object")]
    NotAnObject,
    #[error("message has no type")]
    MissingType,
    #[error("unknown message type '{0}'")]
    UnknownType(String),
    #[error("{kind}: selection name is empty")]
    EmptySelection { kind: &'static str },
    #[error("{kind}: field '{field}' has an unusable value")]
    InvalidPayload {
        kind: &'static str,
        field: &'static str,
    },
    #[error("{kind}: value {value} outside {min}..={max}")]
    OutOfRange {
        kind: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl InboundError {
    /// Envelope-level failures, as opposed to a well-formed message carrying a rejected payload.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::NotAnObject | Self::MissingType
        )
    }

    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType(_))
    }
}
