mod display_state;
mod snapshot;

pub use display_state::*;
pub use snapshot::*;
