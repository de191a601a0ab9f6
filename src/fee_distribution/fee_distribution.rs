use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::Instrument;

use super::{FeeDistribution, FeeTarget};
use crate::{
    dashboard::{Redraw, RedrawHandle},
    mempool_client::FeeFetcher,
};

/// Runs at most one meaningful fee distribution request at a time.
///
/// A superseded request is not interrupted; it runs to completion and its
/// result is dropped because its generation is no longer current.
pub struct DetailFetcher<F> {
    fetcher: Arc<F>,
    state: Arc<Mutex<FeeDistribution>>,
    redraw: RedrawHandle,
    runtime: Handle,
}

impl<F> Clone for DetailFetcher<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            state: self.state.clone(),
            redraw: self.redraw.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<F: FeeFetcher> DetailFetcher<F> {
    pub fn new(fetcher: Arc<F>, redraw: RedrawHandle, runtime: Handle) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(FeeDistribution::default())),
            redraw,
            runtime,
        }
    }

    /// Supersedes whatever is in flight and starts fetching `target`.
    pub fn trigger(&self, target: FeeTarget) -> JoinHandle<()> {
        let generation = self.state.lock().begin(target);
        self.redraw.request(Redraw::Overlay);

        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        let redraw = self.redraw.clone();
        let span = tracing::info_span!("fee_distribution", %target, generation);
        self.runtime.spawn(
            async move {
                let result = fetcher.fetch(target).await;
                if let Err(e) = &result {
                    tracing::warn!(error.cause_chain = ?e, "fee distribution fetch failed");
                }
                let applied = state.lock().complete(generation, result);
                if applied {
                    redraw.request(Redraw::Overlay);
                } else {
                    tracing::debug!("discarding superseded fee distribution");
                }
            }
            .instrument(span),
        )
    }

    pub fn close(&self) {
        self.state.lock().close();
        self.redraw.request(Redraw::Overlay);
    }

    /// Copy of the current overlay state for one render pass.
    pub fn current(&self) -> FeeDistribution {
        self.state.lock().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().target.is_some()
    }
}
