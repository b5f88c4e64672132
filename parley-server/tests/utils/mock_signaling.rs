use async_trait::async_trait;
use parley_core::{ConnectionId, ServerEvent};
use parley_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One event the relay emitted, with its destination.
#[derive(Debug, Clone)]
pub struct Signal {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

/// Mock SignalingOutput that records every outgoing event in emission order.
#[derive(Clone, Default)]
pub struct MockSignalingOutput {
    signals: Arc<Mutex<Vec<Signal>>>,
}

impl MockSignalingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, across all connections.
    pub async fn all(&self) -> Vec<Signal> {
        self.signals.lock().await.clone()
    }

    /// Events delivered to one connection, in order.
    pub async fn events_for(&self, conn: &ConnectionId) -> Vec<ServerEvent> {
        self.signals
            .lock()
            .await
            .iter()
            .filter(|s| &s.to == conn)
            .map(|s| s.event.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.signals.lock().await.clear();
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_event(&self, conn: ConnectionId, event: ServerEvent) {
        tracing::debug!("[MockSignaling] {} to {}", event.name(), conn);
        self.signals.lock().await.push(Signal { to: conn, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_signaling_keeps_order_per_connection() {
        let signaling = MockSignalingOutput::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();

        signaling.send_event(a, ServerEvent::Welcome { id: a }).await;
        signaling.send_event(b, ServerEvent::Welcome { id: b }).await;
        signaling.send_event(a, ServerEvent::EndCall { from: b }).await;

        let events = signaling.events_for(&a).await;
        assert_eq!(
            events,
            vec![ServerEvent::Welcome { id: a }, ServerEvent::EndCall { from: b }]
        );
        assert_eq!(signaling.all().await.len(), 3);

        signaling.clear().await;
        assert!(signaling.all().await.is_empty());
    }
}
