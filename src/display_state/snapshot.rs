use crate::mempool_manager::{ConfirmedBlock, MempoolStats, ProjectedBlock, TrackedTxStatus};

/// Tracking session as last reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tracking {
    /// No tracking update has been received yet.
    #[default]
    Unknown,
    /// The server reported that no transaction is tracked.
    Inactive,
    Active(TrackedTxStatus),
}

impl Tracking {
    pub fn status(&self) -> Option<&TrackedTxStatus> {
        match self {
            Tracking::Active(status) => Some(status),
            Tracking::Unknown | Tracking::Inactive => None,
        }
    }
}

/// Everything the renderer needs for one frame of the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySnapshot {
    /// Newest first, never longer than the display window.
    pub confirmed_blocks: Vec<ConfirmedBlock>,
    /// Index 0 is the next block to be mined.
    pub projected_blocks: Vec<ProjectedBlock>,
    pub stats: Option<MempoolStats>,
    pub tracking: Tracking,
    pub loaded: bool,
}

impl DisplaySnapshot {
    /// Whether the confirmed block at `height` holds the tracked transaction.
    pub fn holds_tracked_tx(&self, height: u64) -> bool {
        matches!(
            self.tracking.status(),
            Some(status) if status.confirmed && status.block_height == Some(height)
        )
    }
}
