use serde::{Deserialize, Serialize};

/// Fee rate of a single transaction, in sat/vB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSample {
    #[serde(rename = "fpv")]
    pub fee_rate: f64,
}

impl From<f64> for FeeSample {
    fn from(fee_rate: f64) -> Self {
        Self { fee_rate }
    }
}
