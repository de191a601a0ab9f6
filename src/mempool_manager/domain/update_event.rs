use super::{ConfirmedBlock, MempoolStats, ProjectedBlock, TrackedTxStatus};

/// One piece of a decoded websocket message.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    ConfirmedBlocks(Vec<ConfirmedBlock>),
    ProjectedBlocks(Vec<ProjectedBlock>),
    Stats(MempoolStats),
    SingleBlock(ConfirmedBlock),
    /// `None` means no tracking session is active.
    TrackedTx(Option<TrackedTxStatus>),
}
