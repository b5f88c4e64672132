use crate::presence::Participant;
use crate::relay::Relay;
use parley_core::{ConnectionId, Registration, RoomId, ServerEvent};
use tracing::{debug, info};

impl Relay {
    /// Handles `register-user`.
    ///
    /// Order: bind, deliver queued candidates, announce the newcomer to the
    /// whole room (itself included), then back-fill the newcomer with every
    /// other registered member.
    pub(crate) async fn register(&mut self, conn: ConnectionId, registration: Registration) {
        let Registration {
            room,
            uid,
            name,
            user_type,
        } = registration;

        info!("Registering {} as {} in room '{}'", conn, uid, room);

        let participant = Participant {
            conn,
            room: room.clone(),
            uid: uid.clone(),
            name,
            user_type,
        };

        if let Some(previous) = self.registry.register(participant.clone()) {
            if previous.uid != uid && self.identities.unbind(&previous.uid, &conn) {
                debug!("{} no longer speaks for {}", conn, previous.uid);
            }
        }

        if let Some(replaced) = self.identities.bind(uid.clone(), conn) {
            if replaced != conn {
                debug!("{} moved from {} to {}", uid, replaced, conn);
            }
        }
        self.rooms.join(room.clone(), conn);

        let queued = self.pending.flush(&uid);
        if let Some(oldest) = queued.first() {
            debug!(
                "Delivering {} queued candidates to {} (oldest waited {:?})",
                queued.len(),
                uid,
                oldest.enqueued_at.elapsed()
            );
        }
        for entry in queued {
            let event = ServerEvent::IceCandidate {
                candidate: entry.candidate,
                from: entry.from,
            };
            self.emit(conn, event).await;
        }

        let members = self.rooms.members(&room);
        let announcement = ServerEvent::UserInfo(participant.presence());
        self.emit_all(members.iter().copied(), &announcement).await;

        for member in members.into_iter().filter(|member| *member != conn) {
            let Some(existing) = self.registry.lookup(&member) else {
                continue;
            };
            let backfill = ServerEvent::UserInfo(existing.presence());
            self.emit(conn, backfill).await;
        }
    }

    /// Handles the legacy `join-room`: membership plus a bare `new-user`
    /// announcement to the others, no presence record.
    pub(crate) async fn join_room(&mut self, conn: ConnectionId, room: RoomId) {
        let others: Vec<ConnectionId> = self
            .rooms
            .members(&room)
            .into_iter()
            .filter(|member| *member != conn)
            .collect();

        self.rooms.join(room.clone(), conn);
        info!(
            "Connection {} joined room '{}' (size: {})",
            conn,
            room,
            others.len() + 1
        );

        let polite = !others.is_empty();
        self.emit_all(others, &ServerEvent::NewUser { id: conn, polite }).await;
    }
}
