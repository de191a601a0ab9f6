mod mempool_space_client;

pub use mempool_space_client::*;
