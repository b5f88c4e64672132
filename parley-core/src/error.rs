use thiserror::Error;

/// Reasons an inbound frame is discarded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
