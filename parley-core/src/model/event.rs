use crate::error::ProtocolError;
use crate::model::{ConnectionId, PresenceInfo, RoomId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `register-user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub room: RoomId,
    pub uid: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_type: String,
}

/// Events a client sends to the relay.
///
/// Frames are adjacently tagged: `{"event": "offer", "data": {"sdp": ..., "to": "..."}}`.
/// `to` is either a stable user id or a live connection id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    RegisterUser(Registration),
    JoinRoom(RoomId),
    Offer { sdp: Value, to: String },
    Answer { sdp: Value, to: String },
    IceCandidate { candidate: Value, to: String },
    EndCall { to: String },
    NewTranslation(Value),
}

impl ClientEvent {
    /// Parses a text frame and rejects events missing a required field.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let event: Self = serde_json::from_str(text)?;
        event.validate()?;
        Ok(event)
    }

    fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Self::RegisterUser(reg) => {
                if reg.room.as_str().is_empty() {
                    return Err(ProtocolError::MissingField("room"));
                }
                if reg.uid.as_str().is_empty() {
                    return Err(ProtocolError::MissingField("uid"));
                }
            }
            Self::JoinRoom(room) if room.as_str().is_empty() => {
                return Err(ProtocolError::MissingField("room"));
            }
            Self::Offer { sdp, to } | Self::Answer { sdp, to } => {
                if sdp.is_null() {
                    return Err(ProtocolError::MissingField("sdp"));
                }
                require_target(to)?;
            }
            Self::IceCandidate { candidate, to } => {
                if is_blank(candidate) {
                    return Err(ProtocolError::MissingField("candidate"));
                }
                require_target(to)?;
            }
            Self::EndCall { to } => require_target(to)?,
            _ => {}
        }
        Ok(())
    }

    /// Event name as it appears on the wire, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterUser(_) => "register-user",
            Self::JoinRoom(_) => "join-room",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::EndCall { .. } => "end-call",
            Self::NewTranslation(_) => "new-translation",
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn require_target(to: &str) -> Result<(), ProtocolError> {
    if to.is_empty() {
        return Err(ProtocolError::MissingField("to"));
    }
    Ok(())
}

/// Events the relay emits to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// First frame on every connection: the client's own live id.
    Welcome { id: ConnectionId },
    /// Legacy `join-room` announcement.
    NewUser { id: ConnectionId, polite: bool },
    UserInfo(PresenceInfo),
    UserLeft { uid: UserId },
    /// A connection that never registered went away.
    UserDisconnected { id: ConnectionId },
    Offer { sdp: Value, from: ConnectionId },
    Answer { sdp: Value, from: ConnectionId },
    IceCandidate { candidate: Value, from: ConnectionId },
    EndCall { from: ConnectionId },
    NewTranslation(Value),
}

impl ServerEvent {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::NewUser { .. } => "new-user",
            Self::UserInfo(_) => "user-info",
            Self::UserLeft { .. } => "user-left",
            Self::UserDisconnected { .. } => "user-disconnected",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
            Self::EndCall { .. } => "end-call",
            Self::NewTranslation(_) => "new-translation",
        }
    }
}
