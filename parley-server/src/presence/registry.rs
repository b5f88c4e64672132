use parley_core::{ConnectionId, PresenceInfo, RoomId, UserId};
use std::collections::HashMap;

/// A registered peer, keyed by its live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub conn: ConnectionId,
    pub room: RoomId,
    pub uid: UserId,
    pub name: String,
    pub user_type: String,
}

impl Participant {
    pub fn presence(&self) -> PresenceInfo {
        PresenceInfo {
            id: self.conn,
            room: self.room.clone(),
            uid: self.uid.clone(),
            name: self.name.clone(),
            user_type: self.user_type.clone(),
        }
    }
}

/// Owns every [`Participant`]. One record per live connection.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    participants: HashMap<ConnectionId, Participant>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record, returning the one it replaced on the same connection.
    pub fn register(&mut self, participant: Participant) -> Option<Participant> {
        self.participants.insert(participant.conn, participant)
    }

    pub fn lookup(&self, conn: &ConnectionId) -> Option<&Participant> {
        self.participants.get(conn)
    }

    /// Idempotent: a second call for the same connection returns `None`.
    pub fn remove(&mut self, conn: &ConnectionId) -> Option<Participant> {
        self.participants.remove(conn)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
