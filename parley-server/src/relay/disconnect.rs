use crate::relay::relay_command::TimerEvent;
use crate::relay::Relay;
use parley_core::{ConnectionId, ServerEvent};
use std::collections::BTreeSet;
use tracing::{debug, info};

impl Relay {
    /// Transport loss: leave rooms now, debounce the presence teardown.
    pub(crate) async fn on_transport_closed(&mut self, conn: ConnectionId) {
        if !self.open.remove(&conn) {
            debug!("Connection {} already closed", conn);
            return;
        }
        info!("Transport closed for {}", conn);

        let mut peers = BTreeSet::new();
        for room in self.rooms.leave_all(&conn) {
            peers.extend(self.rooms.members(&room));
        }

        self.emit_all(peers.iter().copied(), &ServerEvent::EndCall { from: conn }).await;

        if self.registry.lookup(&conn).is_none() {
            self.emit_all(peers, &ServerEvent::UserDisconnected { id: conn }).await;
            return;
        }

        debug!(
            "Removing presence of {} in {:?} unless it re-registers",
            conn, self.config.disconnect_grace
        );
        self.schedule(self.config.disconnect_grace, TimerEvent::DisconnectGrace { conn });
    }

    /// Grace period over: tear down the record and tell the room, unless the
    /// stable id was re-bound to a newer connection meanwhile.
    pub(crate) async fn on_grace_elapsed(&mut self, conn: ConnectionId) {
        let Some(participant) = self.registry.remove(&conn) else {
            debug!("Presence of {} already removed", conn);
            return;
        };

        if !self.identities.unbind(&participant.uid, &conn) {
            info!(
                "{} re-registered elsewhere, suppressing user-left for {}",
                participant.uid, conn
            );
            return;
        }

        info!("{} left room '{}'", participant.uid, participant.room);
        let members = self.rooms.members(&participant.room);
        self.emit_all(
            members,
            &ServerEvent::UserLeft {
                uid: participant.uid,
            },
        )
        .await;
    }
}
