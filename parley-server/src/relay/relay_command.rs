use parley_core::{ClientEvent, ConnectionId, UserId};

/// Commands fed into the relay by the transport layer.
#[derive(Debug)]
pub enum RelayCommand {
    /// A transport connection opened.
    Connected { conn: ConnectionId },

    /// A decoded event arrived on a connection.
    Event { conn: ConnectionId, event: ClientEvent },

    /// The transport connection is gone.
    Disconnected { conn: ConnectionId },
}

/// Deferred work the relay schedules for itself.
#[derive(Debug)]
pub(crate) enum TimerEvent {
    PurgeCandidates { target: UserId, generation: u64 },
    DisconnectGrace { conn: ConnectionId },
}
