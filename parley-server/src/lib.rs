mod presence;
mod relay;
mod signaling;

pub use presence::*;
pub use relay::*;
pub use signaling::*;
