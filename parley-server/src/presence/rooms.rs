use parley_core::{ConnectionId, RoomId};
use std::collections::{BTreeSet, HashMap};

/// Which open connections belong to which rooms.
///
/// A connection can sit in several rooms; joins accumulate until the
/// connection closes.
#[derive(Debug, Default)]
pub struct RoomMembership {
    rooms: HashMap<RoomId, BTreeSet<ConnectionId>>,
    joined: HashMap<ConnectionId, BTreeSet<RoomId>>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already a member.
    pub fn join(&mut self, room: RoomId, conn: ConnectionId) -> bool {
        self.joined.entry(conn).or_default().insert(room.clone());
        self.rooms.entry(room).or_default().insert(conn)
    }

    #[cfg(test)]
    pub fn size(&self, room: &RoomId) -> usize {
        self.rooms.get(room).map_or(0, BTreeSet::len)
    }

    pub fn members(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn rooms_of(&self, conn: &ConnectionId) -> Vec<RoomId> {
        self.joined
            .get(conn)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every other connection sharing at least one room with `conn`, once each.
    pub fn peers_of(&self, conn: &ConnectionId) -> BTreeSet<ConnectionId> {
        let Some(rooms) = self.joined.get(conn) else {
            return BTreeSet::new();
        };

        rooms
            .iter()
            .filter_map(|room| self.rooms.get(room))
            .flatten()
            .filter(|member| *member != conn)
            .copied()
            .collect()
    }

    /// Removes the connection from all its rooms and returns them.
    pub fn leave_all(&mut self, conn: &ConnectionId) -> Vec<RoomId> {
        let Some(rooms) = self.joined.remove(conn) else {
            return Vec::new();
        };

        for room in &rooms {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(conn);
                if members.is_empty() {
                    self.rooms.remove(room);
                }
            }
        }

        rooms.into_iter().collect()
    }

    #[cfg(test)]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
