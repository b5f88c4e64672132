mod disconnect;
mod presence_broadcast;
mod relay;
mod relay_command;
mod relay_config;
mod signal_router;

pub use relay::*;
pub use relay_command::*;
pub use relay_config::*;
