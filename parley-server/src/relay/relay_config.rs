use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// How long a closed connection keeps its presence before `user-left` is sent.
    pub disconnect_grace: Duration,
    /// How long candidates for an unregistered target are kept.
    pub candidate_ttl: Duration,
    /// Capacity of the inbound command channel.
    pub command_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            disconnect_grace: Duration::from_secs(1),
            candidate_ttl: Duration::from_secs(60),
            command_buffer: 256,
        }
    }
}
