use parley_core::ConnectionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("no open socket for connection {0}")]
    UnknownConnection(ConnectionId),

    #[error("outbound channel for connection {0} is closed")]
    ChannelClosed(ConnectionId),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}
