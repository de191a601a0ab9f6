use super::FeeSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeStats {
    pub min: f64,
    pub max: f64,
    /// Sample at `len / 2`; even counts take the upper median.
    pub median: f64,
    pub tx_count: usize,
}

impl FeeStats {
    /// `samples` must be sorted ascending. Returns `None` for an empty slice.
    pub fn from_sorted(samples: &[FeeSample]) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;
        let tx_count = samples.len();
        Some(Self {
            min: first.fee_rate,
            max: last.fee_rate,
            median: samples[tx_count / 2].fee_rate,
            tx_count,
        })
    }
}
