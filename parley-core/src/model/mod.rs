mod connection;
mod event;
mod presence;
mod room;
mod user;

pub use connection::ConnectionId;
pub use event::{ClientEvent, Registration, ServerEvent};
pub use presence::PresenceInfo;
pub use room::RoomId;
pub use user::UserId;
