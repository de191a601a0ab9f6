use crossbeam_channel::{Receiver, Sender};

/// What asked for a render pass. The renderer redraws the whole frame either
/// way; the kind only feeds tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Dashboard,
    Overlay,
}

/// Cloneable handle other tasks use to schedule a render pass without ever
/// touching the terminal themselves.
#[derive(Debug, Clone)]
pub struct RedrawHandle {
    tx: Sender<Redraw>,
}

impl RedrawHandle {
    /// Never blocks. Requests sent after the renderer is gone are dropped.
    pub fn request(&self, redraw: Redraw) {
        let _ = self.tx.send(redraw);
    }
}

/// Render-side end of the redraw signal.
#[derive(Debug)]
pub struct RedrawQueue {
    rx: Receiver<Redraw>,
}

impl RedrawQueue {
    /// Takes every pending request and returns how many were coalesced.
    pub fn drain(&self) -> usize {
        let (mut dashboard, mut overlay) = (0, 0);
        for redraw in self.rx.try_iter() {
            match redraw {
                Redraw::Dashboard => dashboard += 1,
                Redraw::Overlay => overlay += 1,
            }
        }
        if dashboard + overlay > 0 {
            tracing::trace!(dashboard, overlay, "coalescing redraw requests");
        }
        dashboard + overlay
    }
}

pub fn redraw_channel() -> (RedrawHandle, RedrawQueue) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (RedrawHandle { tx }, RedrawQueue { rx })
}
