use crate::{
    fee_distribution::{DetailFetcher, FeeTarget},
    layout::DashboardLayout,
    mempool_client::FeeFetcher,
    mempool_manager::TxTracker,
};

use super::{InputEvent, Key};

/// Longest text accepted in the search box (a hex txid).
const TXID_LENGTH: usize = 64;

/// Overlay currently on top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    FeeDistribution,
    TxSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Routes input events to the detail fetcher, the search box and the
/// tracking request. At most one overlay is open: opening one closes the
/// other.
pub struct InputDispatcher<F> {
    detail: DetailFetcher<F>,
    tracker: TxTracker,
    search: Option<String>,
}

impl<F: FeeFetcher> InputDispatcher<F> {
    pub fn new(detail: DetailFetcher<F>, tracker: TxTracker) -> Self {
        Self {
            detail,
            tracker,
            search: None,
        }
    }

    pub fn overlay(&self) -> Overlay {
        if self.search.is_some() {
            Overlay::TxSearch
        } else if self.detail.is_open() {
            Overlay::FeeDistribution
        } else {
            Overlay::None
        }
    }

    /// Text typed so far, while the search box is open.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn detail(&self) -> &DetailFetcher<F> {
        &self.detail
    }

    /// `layout` is the one last drawn; clicks are resolved against it.
    pub fn handle(&mut self, event: InputEvent, layout: &DashboardLayout) -> Control {
        match event {
            InputEvent::Key(Key::CtrlC) => return Control::Quit,
            InputEvent::Click { column, row } => {
                if let Some(target) = layout.tile_at(column, row) {
                    self.show_fees(target);
                }
            }
            InputEvent::Key(key) if self.search.is_some() => self.edit_search(key),
            InputEvent::Key(Key::Char('q')) => return Control::Quit,
            InputEvent::Key(Key::Char('f')) => {
                if self.detail.is_open() {
                    self.detail.close();
                }
                self.search = Some(String::new());
            }
            InputEvent::Key(Key::Char(digit @ '1'..='9')) => {
                let index = digit as usize - '1' as usize;
                let target = FeeTarget::Projected(index);
                if layout.tiles.iter().any(|tile| tile.target == target) {
                    self.show_fees(target);
                }
            }
            InputEvent::Key(Key::Esc) => {
                if self.detail.is_open() {
                    self.detail.close();
                }
            }
            InputEvent::Key(_) | InputEvent::Resize => {}
        }
        Control::Continue
    }

    fn show_fees(&mut self, target: FeeTarget) {
        self.search = None;
        tracing::info!(%target, "showing fee distribution");
        self.detail.trigger(target);
    }

    fn edit_search(&mut self, key: Key) {
        match key {
            Key::Esc => self.search = None,
            Key::Enter => {
                if let Some(text) = self.search.take() {
                    let tx_id = text.trim();
                    if !tx_id.is_empty() {
                        self.tracker.track(tx_id);
                    }
                }
            }
            Key::Backspace => {
                if let Some(text) = self.search.as_mut() {
                    text.pop();
                }
            }
            Key::Char(c) if !c.is_whitespace() => {
                if let Some(text) = self.search.as_mut() {
                    if text.len() < TXID_LENGTH {
                        text.push(c);
                    }
                }
            }
            Key::Char(_) | Key::CtrlC => {}
        }
    }
}
