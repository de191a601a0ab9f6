use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackTx {
    pub tracking: bool,
    #[serde(default)]
    pub block_height: Option<u64>,
}

/// Where the transaction the user asked to track currently sits.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedTxStatus {
    pub tracking: bool,
    pub block_height: Option<u64>,
    pub confirmed: bool,
}
