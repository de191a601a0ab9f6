use serde::Deserialize;

/// A block already included in the chain, as pushed by the websocket.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BlockWire")]
pub struct ConfirmedBlock {
    pub hash: String,
    pub height: u64,
    pub n_tx: u64,
    pub size: u64,
    /// Unix timestamp in seconds.
    pub time: i64,
    pub weight: u64,
    pub fees: f64,
    pub min_fee: f64,
    pub max_fee: f64,
    pub median_fee: f64,
}

/// Fee summary `/api/v1/ws` nests under `extras`.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    #[serde(default)]
    pub median_fee: f64,
    /// Lowest to highest fee rate in the block.
    #[serde(default)]
    pub fee_range: Vec<f64>,
    #[serde(default)]
    pub total_fees: f64,
}

impl Extras {
    pub fn min_fee(&self) -> Option<f64> {
        self.fee_range.first().copied()
    }

    pub fn max_fee(&self) -> Option<f64> {
        self.fee_range.last().copied()
    }
}

/// Both block shapes a mempool instance sends: the flat one of the legacy
/// `/ws` endpoint (`nTx`, `time`, `minFee`...) and the one of `/api/v1/ws`
/// (`tx_count`, `timestamp`, `extras`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockWire {
    #[serde(default, alias = "id")]
    hash: String,
    height: u64,
    #[serde(alias = "tx_count")]
    n_tx: u64,
    size: u64,
    #[serde(alias = "timestamp")]
    time: i64,
    weight: u64,
    fees: Option<f64>,
    min_fee: Option<f64>,
    max_fee: Option<f64>,
    median_fee: Option<f64>,
    extras: Option<Extras>,
}

impl From<BlockWire> for ConfirmedBlock {
    fn from(wire: BlockWire) -> Self {
        let extras = wire.extras.unwrap_or_default();
        Self {
            hash: wire.hash,
            height: wire.height,
            n_tx: wire.n_tx,
            size: wire.size,
            time: wire.time,
            weight: wire.weight,
            fees: wire.fees.unwrap_or(extras.total_fees),
            min_fee: wire.min_fee.or(extras.min_fee()).unwrap_or_default(),
            max_fee: wire.max_fee.or(extras.max_fee()).unwrap_or_default(),
            median_fee: wire.median_fee.unwrap_or(extras.median_fee),
        }
    }
}
