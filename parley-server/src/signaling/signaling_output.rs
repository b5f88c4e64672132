use async_trait::async_trait;
use parley_core::{ConnectionId, ServerEvent};

/// Implemented by whatever hosts the connections, so the relay can reach a
/// single live connection.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver one event to one connection. Failures are the implementor's to log.
    async fn send_event(&self, conn: ConnectionId, event: ServerEvent);
}
