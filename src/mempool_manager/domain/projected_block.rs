use serde::Deserialize;

const BLOCK_WEIGHT_PER_VBYTE: f64 = 4.0;

/// A block the current mempool would produce. Only meaningful together with
/// its position in the projected sequence (0 = next block).
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProjectedBlockWire")]
pub struct ProjectedBlock {
    pub block_size: u64,
    pub block_weight: u64,
    pub n_tx: u64,
    pub min_fee: f64,
    pub max_fee: f64,
    pub median_fee: f64,
    pub fees: f64,
    pub has_my_tx: bool,
}

/// `projectedBlocks` entries carry `blockWeight` and explicit fee bounds;
/// `mempool-blocks` entries carry `blockVSize` and a `feeRange`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectedBlockWire {
    block_size: u64,
    block_weight: Option<u64>,
    #[serde(rename = "blockVSize")]
    block_vsize: Option<f64>,
    n_tx: u64,
    min_fee: Option<f64>,
    max_fee: Option<f64>,
    median_fee: f64,
    #[serde(default, alias = "totalFees")]
    fees: f64,
    #[serde(default)]
    fee_range: Vec<f64>,
    #[serde(default, rename = "hasMytx")]
    has_my_tx: bool,
}

impl From<ProjectedBlockWire> for ProjectedBlock {
    fn from(wire: ProjectedBlockWire) -> Self {
        let block_weight = wire.block_weight.unwrap_or_else(|| {
            (wire.block_vsize.unwrap_or_default() * BLOCK_WEIGHT_PER_VBYTE).round() as u64
        });
        Self {
            block_size: wire.block_size,
            block_weight,
            n_tx: wire.n_tx,
            min_fee: wire
                .min_fee
                .or(wire.fee_range.first().copied())
                .unwrap_or_default(),
            max_fee: wire
                .max_fee
                .or(wire.fee_range.last().copied())
                .unwrap_or_default(),
            median_fee: wire.median_fee,
            fees: wire.fees,
            has_my_tx: wire.has_my_tx,
        }
    }
}
