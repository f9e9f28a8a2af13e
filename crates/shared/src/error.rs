use thiserror::Error;

/// Failure of a single remote entity lookup.
///
/// Batch callers never see these; each one collapses into an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote returned status {status}")]
    Remote { status: u16 },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Remote { .. } => "remote",
            FetchError::MalformedResponse(_) => "malformed_response",
        }
    }
}
