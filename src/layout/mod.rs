//! Maps a [`DisplaySnapshot`](crate::display_state::DisplaySnapshot) onto a
//! terminal grid. Nothing in here touches the terminal.
mod engine;
mod format;
mod overlay;
mod tile;

pub use engine::*;
pub use format::*;
pub use overlay::*;
pub use tile::*;
