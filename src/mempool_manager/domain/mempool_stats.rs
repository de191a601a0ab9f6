use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MempoolInfo {
    pub size: u64,
    pub bytes: u64,
}

/// Aggregate mempool figures. Replaced on every stats update.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MempoolStats {
    /// Pending transaction count.
    pub size: u64,
    /// Pending bytes.
    pub bytes: u64,
    pub tx_per_second: Option<f64>,
    pub vbytes_per_second: Option<f64>,
}
