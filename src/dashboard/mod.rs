/// Redraw signal shared between the streaming task, the fetcher and the
/// render loop.
mod redraw;
pub use redraw::{redraw_channel, Redraw, RedrawHandle, RedrawQueue};

/// Ratatui drawing of a computed layout and its overlays.
mod draw;
pub use draw::{draw_dashboard, OverlayView};

/// Terminal setup and the render/input loop.
mod dashboard;
pub use dashboard::Dashboard;
