use parking_lot::RwLock;
use std::sync::Arc;
use tracing::instrument;

use super::{DisplaySnapshot, Tracking};
use crate::{
    dashboard::{Redraw, RedrawHandle},
    mempool_manager::{ConfirmedBlock, UpdateEvent},
};

/// Merges update events into a [`DisplaySnapshot`].
#[derive(Debug, Clone)]
pub struct DisplayState {
    snapshot: DisplaySnapshot,
    window: usize,
}

impl DisplayState {
    pub fn new(window: usize) -> Self {
        Self {
            snapshot: DisplaySnapshot::default(),
            window,
        }
    }

    pub fn snapshot(&self) -> &DisplaySnapshot {
        &self.snapshot
    }

    pub fn apply(&mut self, event: UpdateEvent) {
        match event {
            UpdateEvent::ConfirmedBlocks(mut blocks) => {
                blocks.sort_by(|a, b| b.height.cmp(&a.height));
                blocks.dedup_by_key(|block| block.height);
                blocks.truncate(self.window);
                self.snapshot.confirmed_blocks = blocks;
            }
            UpdateEvent::SingleBlock(block) => self.push_block(block),
            UpdateEvent::ProjectedBlocks(blocks) => self.snapshot.projected_blocks = blocks,
            UpdateEvent::Stats(stats) => self.snapshot.stats = Some(stats),
            UpdateEvent::TrackedTx(status) => {
                self.snapshot.tracking = match status {
                    Some(status) => Tracking::Active(status),
                    None => Tracking::Inactive,
                }
            }
        }
        self.snapshot.loaded = true;
    }

    fn push_block(&mut self, block: ConfirmedBlock) {
        let blocks = &mut self.snapshot.confirmed_blocks;
        if blocks.iter().any(|known| known.height == block.height) {
            return;
        }
        let position = blocks
            .iter()
            .position(|known| known.height < block.height)
            .unwrap_or(blocks.len());
        blocks.insert(position, block);
        blocks.truncate(self.window);
    }
}

/// The single shared [`DisplayState`]: written by the streaming task, read by
/// the render thread.
#[derive(Debug, Clone)]
pub struct SharedDisplayState {
    inner: Arc<RwLock<DisplayState>>,
    redraw: RedrawHandle,
}

impl SharedDisplayState {
    pub fn new(window: usize, redraw: RedrawHandle) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DisplayState::new(window))),
            redraw,
        }
    }

    /// Applies all events of one message under a single write lock, then
    /// schedules one render pass per event.
    #[instrument(skip_all, fields(events = events.len()))]
    pub fn apply_all(&self, events: Vec<UpdateEvent>) {
        let applied = events.len();
        {
            let mut state = self.inner.write();
            for event in events {
                state.apply(event);
            }
        }
        for _ in 0..applied {
            self.redraw.request(Redraw::Dashboard);
        }
    }

    /// Runs `f` with read access to the current snapshot.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&DisplaySnapshot) -> R) -> R {
        let state = self.inner.read();
        f(state.snapshot())
    }
}
