use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
};
use ratatui::{backend::Backend, Terminal};

use super::{draw_dashboard, OverlayView, RedrawQueue};
use crate::{
    display_state::SharedDisplayState,
    input::{Control, InputDispatcher, InputEvent, Overlay},
    layout::{compute_layout, DashboardLayout},
    mempool_client::FeeFetcher,
};

/// Relative block ages go stale even without updates.
const AGE_REFRESH: Duration = Duration::from_secs(1);

/// The render/input loop. Runs on a single thread; it is the only code that
/// touches the terminal.
pub struct Dashboard<F> {
    display_state: SharedDisplayState,
    dispatcher: InputDispatcher<F>,
    redraw: RedrawQueue,
    kill_signal: Arc<AtomicBool>,
    tick_rate: Duration,
}

impl<F: FeeFetcher> Dashboard<F> {
    pub fn new(
        display_state: SharedDisplayState,
        dispatcher: InputDispatcher<F>,
        redraw: RedrawQueue,
        kill_signal: Arc<AtomicBool>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            display_state,
            dispatcher,
            redraw,
            kill_signal,
            tick_rate,
        }
    }

    /// Takes over the terminal until the user quits or the kill signal is
    /// raised, then restores it.
    pub fn run(mut self) -> io::Result<()> {
        let mut terminal = ratatui::try_init()?;
        let _restore = TerminalGuard(restore_terminal);
        execute!(io::stdout(), EnableMouseCapture)?;

        self.event_loop(&mut terminal)
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut layout = self.render(terminal)?;
        let mut last_render = Instant::now();
        loop {
            if self.kill_signal.load(Ordering::Relaxed) {
                tracing::info!("kill signal raised, leaving dashboard");
                return Ok(());
            }

            let mut dirty = self.redraw.drain() > 0;
            if event::poll(self.tick_rate)? {
                if let Some(input) = InputEvent::from_crossterm(event::read()?) {
                    if self.dispatch(input, &layout) == Control::Quit {
                        tracing::info!("user quit the dashboard");
                        return Ok(());
                    }
                    dirty = true;
                }
            }

            if dirty || last_render.elapsed() >= AGE_REFRESH {
                layout = self.render(terminal)?;
                last_render = Instant::now();
            }
        }
    }

    /// Routes one input event; `layout` is the one last rendered.
    pub fn dispatch(&mut self, input: InputEvent, layout: &DashboardLayout) -> Control {
        self.dispatcher.handle(input, layout)
    }

    /// One render pass. The snapshot is read-locked only while the layout is
    /// computed, never across terminal I/O.
    pub fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<DashboardLayout> {
        let size = terminal.size()?;
        let now = unix_now();
        let layout = self
            .display_state
            .with_snapshot(|snapshot| compute_layout(snapshot, size.width, size.height, now));

        let overlay = match self.dispatcher.overlay() {
            Overlay::None => OverlayView::None,
            Overlay::FeeDistribution => {
                OverlayView::FeeDistribution(self.dispatcher.detail().current())
            }
            Overlay::TxSearch => {
                OverlayView::TxSearch(self.dispatcher.search_text().unwrap_or_default())
            }
        };
        terminal.draw(|frame| draw_dashboard(frame, &layout, &overlay))?;
        Ok(layout)
    }
}

/// Runs its cleanup on every exit path, errors and panics included.
struct TerminalGuard<F: FnMut()>(F);

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
