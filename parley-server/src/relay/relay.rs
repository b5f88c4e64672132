use crate::presence::{ConnectionRegistry, IdentityIndex, PendingCandidates, RoomMembership};
use crate::relay::relay_command::{RelayCommand, TimerEvent};
use crate::relay::relay_config::RelayConfig;
use crate::signaling::SignalingOutput;
use parley_core::{ClientEvent, ConnectionId, ServerEvent};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The presence and routing engine.
///
/// Owns every index and processes one command or timer at a time, so no
/// state is shared with other tasks. Timers are sleeping tasks that post a
/// [`TimerEvent`] back into the same loop.
pub struct Relay {
    pub(crate) registry: ConnectionRegistry,
    pub(crate) identities: IdentityIndex,
    pub(crate) pending: PendingCandidates,
    pub(crate) rooms: RoomMembership,
    pub(crate) open: HashSet<ConnectionId>,
    pub(crate) config: RelayConfig,
    command_rx: mpsc::Receiver<RelayCommand>,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(
        config: RelayConfig,
        command_rx: mpsc::Receiver<RelayCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();

        Self {
            registry: ConnectionRegistry::new(),
            identities: IdentityIndex::new(),
            pending: PendingCandidates::new(),
            rooms: RoomMembership::new(),
            open: HashSet::new(),
            config,
            command_rx,
            timer_rx,
            timer_tx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down relay.");
                            break;
                        }
                    }
                }

                Some(timer) = self.timer_rx.recv() => self.handle_timer(timer).await,
            }
        }

        info!("Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connected { conn } => {
                info!("Connection opened: {}", conn);
                self.open.insert(conn);
                self.emit(conn, ServerEvent::Welcome { id: conn }).await;
            }

            RelayCommand::Event { conn, event } => {
                if !self.open.contains(&conn) {
                    warn!("Dropping {} from closed connection {}", event.name(), conn);
                    return;
                }
                self.handle_event(conn, event).await;
            }

            RelayCommand::Disconnected { conn } => self.on_transport_closed(conn).await,
        }
    }

    async fn handle_event(&mut self, conn: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::RegisterUser(registration) => self.register(conn, registration).await,
            ClientEvent::JoinRoom(room) => self.join_room(conn, room).await,
            ClientEvent::Offer { sdp, to } => {
                self.route(conn, &to, ServerEvent::Offer { sdp, from: conn }).await
            }
            ClientEvent::Answer { sdp, to } => {
                self.route(conn, &to, ServerEvent::Answer { sdp, from: conn }).await
            }
            ClientEvent::IceCandidate { candidate, to } => {
                self.route_candidate(conn, to, candidate).await
            }
            ClientEvent::EndCall { to } => {
                self.route(conn, &to, ServerEvent::EndCall { from: conn }).await
            }
            ClientEvent::NewTranslation(payload) => self.broadcast_translation(conn, payload).await,
        }
    }

    async fn handle_timer(&mut self, timer: TimerEvent) {
        match timer {
            TimerEvent::PurgeCandidates { target, generation } => {
                let dropped = self.pending.purge(&target, generation);
                if dropped > 0 {
                    debug!(
                        "Dropped {} expired candidates for {}: target never registered",
                        dropped, target
                    );
                }
            }
            TimerEvent::DisconnectGrace { conn } => self.on_grace_elapsed(conn).await,
        }
    }

    pub(crate) fn schedule(&self, delay: Duration, timer: TimerEvent) {
        let tx = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(timer);
        });
    }

    pub(crate) async fn emit(&self, conn: ConnectionId, event: ServerEvent) {
        self.signaling.send_event(conn, event).await;
    }

    pub(crate) async fn emit_all<I>(&self, targets: I, event: &ServerEvent)
    where
        I: IntoIterator<Item = ConnectionId>,
    {
        for conn in targets {
            self.emit(conn, event.clone()).await;
        }
    }
}
