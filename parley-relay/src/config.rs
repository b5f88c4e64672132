use clap::Parser;
use parley_server::RelayConfig;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "parley-relay")]
#[command(about = "Signaling relay for browser peer-to-peer calls")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Delay before a dropped connection is announced as gone.
    #[arg(long, env = "DISCONNECT_GRACE_MS", default_value_t = 1000)]
    pub grace_ms: u64,

    /// How long ICE candidates wait for an unregistered target.
    #[arg(long, env = "CANDIDATE_TTL_SECS", default_value_t = 60)]
    pub candidate_ttl_secs: u64,
}

impl Cli {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            disconnect_grace: Duration::from_millis(self.grace_ms),
            candidate_ttl: Duration::from_secs(self.candidate_ttl_secs),
            ..RelayConfig::default()
        }
    }
}
