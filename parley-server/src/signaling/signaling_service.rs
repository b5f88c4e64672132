use crate::relay::RelayCommand;
use crate::signaling::{SignalingError, SignalingOutput};
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use parley_core::{ConnectionId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Holds the outbound half of every open WebSocket and the relay's inbox.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
            }),
            relay_tx,
        }
    }

    pub fn add_connection(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(conn, tx);
    }

    pub fn remove_connection(&self, conn: &ConnectionId) {
        self.inner.connections.remove(conn);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn deliver(&self, conn: ConnectionId, event: &ServerEvent) -> Result<(), SignalingError> {
        let json = event.encode()?;
        let tx = self
            .inner
            .connections
            .get(&conn)
            .ok_or(SignalingError::UnknownConnection(conn))?;

        tx.send(Message::Text(json.into()))
            .map_err(|_| SignalingError::ChannelClosed(conn))
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, conn: ConnectionId, event: ServerEvent) {
        match self.deliver(conn, &event) {
            Ok(()) => {}
            Err(e @ SignalingError::UnknownConnection(_)) => {
                warn!("Dropping {}: {}", event.name(), e)
            }
            Err(e) => error!("Failed to send {} to {}: {}", event.name(), conn, e),
        }
    }
}
