mod identity_index;
mod pending_candidates;
mod registry;
mod rooms;

pub use identity_index::*;
pub use pending_candidates::*;
pub use registry::*;
pub use rooms::*;
