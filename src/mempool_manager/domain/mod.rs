mod block;
mod mempool_message;
mod mempool_raw;
mod mempool_stats;
mod projected_block;
mod tracked_tx;
mod update_event;

pub use block::*;
pub use mempool_message::*;
pub use mempool_raw::*;
pub use mempool_stats::*;
pub use projected_block::*;
pub use tracked_tx::*;
pub use update_event::*;
