use crate::model::{ConnectionId, RoomId, UserId};
use serde::{Deserialize, Serialize};

/// Presence record as announced to a room in `user-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceInfo {
    pub id: ConnectionId,
    pub room: RoomId,
    pub uid: UserId,
    pub name: String,
    pub user_type: String,
}
