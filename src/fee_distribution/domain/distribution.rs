use super::{FeeSample, FeeStats, FeeTarget};
use crate::mempool_client::FetchError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// State behind the fee distribution overlay.
///
/// Every request is stamped with a new generation; a result carrying any
/// other generation is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeDistribution {
    pub target: Option<FeeTarget>,
    /// Sorted ascending by fee rate.
    pub samples: Vec<FeeSample>,
    pub phase: FetchPhase,
    pub generation: u64,
}

impl FeeDistribution {
    /// Starts a request for `target` and returns its generation.
    pub fn begin(&mut self, target: FeeTarget) -> u64 {
        self.generation += 1;
        self.target = Some(target);
        self.samples.clear();
        self.phase = FetchPhase::Loading;
        self.generation
    }

    /// Applies a finished request. Returns `false` when the result was stale.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Vec<FeeSample>, FetchError>,
    ) -> bool {
        if generation != self.generation || self.phase != FetchPhase::Loading {
            return false;
        }
        match result {
            Ok(mut samples) => {
                samples.sort_by(|a, b| a.fee_rate.total_cmp(&b.fee_rate));
                self.samples = samples;
                self.phase = FetchPhase::Ready;
            }
            Err(e) => self.phase = FetchPhase::Error(e.to_string()),
        }
        true
    }

    /// Drops everything and invalidates any request still in flight.
    pub fn close(&mut self) {
        self.generation += 1;
        self.target = None;
        self.samples.clear();
        self.phase = FetchPhase::Idle;
    }

    pub fn stats(&self) -> Option<FeeStats> {
        match self.phase {
            FetchPhase::Ready => FeeStats::from_sorted(&self.samples),
            _ => None,
        }
    }

    /// An empty result is treated like no data: nothing to show.
    pub fn is_visible(&self) -> bool {
        match self.phase {
            FetchPhase::Idle => false,
            FetchPhase::Loading | FetchPhase::Error(_) => true,
            FetchPhase::Ready => !self.samples.is_empty(),
        }
    }
}
