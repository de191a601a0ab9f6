use ratatui::layout::Rect;

use super::{ceil, format_mempool_size, tile_content, BlockTile, TileContent};
use crate::{display_state::DisplaySnapshot, fee_distribution::FeeTarget};

/// Horizontal room reserved for one tile.
pub const BLOCK_WIDTH: u16 = 22;
/// Tiles that must fit side by side for the horizontal layout.
pub const TILE_COUNT: u16 = 5;
/// Tile height including its border.
pub const TILE_HEIGHT: u16 = 11;
/// Border plus one line of content.
pub const MIN_TILE_HEIGHT: u16 = 3;
/// Rows at the top reserved for the summary bar.
const SUMMARY_ROWS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Projected blocks left of a vertical rule, confirmed blocks right of it.
    Horizontal,
    /// Projected blocks above a horizontal rule, confirmed blocks below it.
    Vertical,
}

pub fn orientation(width: u16) -> Orientation {
    if u32::from(BLOCK_WIDTH) * u32::from(TILE_COUNT) > u32::from(width) {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

/// One placed block tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub target: FeeTarget,
    pub area: Rect,
    pub content: TileContent,
}

/// Result of a layout pass over one snapshot and terminal size.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub area: Rect,
    pub orientation: Orientation,
    /// Rule between projected and confirmed blocks.
    pub separator: Rect,
    pub tiles: Vec<Tile>,
    /// `None` until stats have arrived.
    pub summary: Option<String>,
    /// No update merged yet; show a placeholder instead of tiles.
    pub loading: bool,
}

impl DashboardLayout {
    /// Block under a terminal cell, if any.
    pub fn tile_at(&self, column: u16, row: u16) -> Option<FeeTarget> {
        self.tiles
            .iter()
            .find(|tile| {
                column >= tile.area.x
                    && column < tile.area.x + tile.area.width
                    && row >= tile.area.y
                    && row < tile.area.y + tile.area.height
            })
            .map(|tile| tile.target)
    }
}

/// Lays out `snapshot` on a `width` x `height` grid. `now` is the current
/// unix time in seconds.
pub fn compute_layout(
    snapshot: &DisplaySnapshot,
    width: u16,
    height: u16,
    now: i64,
) -> DashboardLayout {
    let area = Rect::new(0, 0, width, height);
    let orientation = orientation(width);
    let geometry = Geometry::new(orientation, width, height);

    let mut tiles = vec![];
    for (index, block) in snapshot.projected_blocks.iter().enumerate() {
        let Some(rect) = geometry.projected(index) else {
            break;
        };
        tiles.push(Tile {
            target: FeeTarget::Projected(index),
            area: rect,
            content: tile_content(BlockTile::Projected { index, block }, now, block.has_my_tx),
        });
    }
    for (index, block) in snapshot.confirmed_blocks.iter().enumerate() {
        let Some(rect) = geometry.confirmed(index) else {
            break;
        };
        tiles.push(Tile {
            target: FeeTarget::Height(block.height),
            area: rect,
            content: tile_content(
                BlockTile::Confirmed(block),
                now,
                snapshot.holds_tracked_tx(block.height),
            ),
        });
    }

    DashboardLayout {
        area,
        orientation,
        separator: geometry.separator(),
        tiles,
        summary: summary_line(snapshot),
        loading: !snapshot.loaded,
    }
}

/// Text of the summary bar, once stats are known.
pub fn summary_line(snapshot: &DisplaySnapshot) -> Option<String> {
    let stats = snapshot.stats?;
    let mut parts = vec![
        format!("Unconfirmed: {} txs", stats.size),
        format!(
            "Mempool size: {} ({} blocks)",
            format_mempool_size(stats.bytes),
            snapshot.projected_blocks.len()
        ),
    ];
    if let Some(tx_per_second) = stats.tx_per_second {
        parts.push(format!("{:.1} tx/s", tx_per_second));
    }
    if let Some(vbytes_per_second) = stats.vbytes_per_second {
        parts.push(format!("{} vB/s", ceil(vbytes_per_second)));
    }
    Some(parts.join(" | "))
}

/// Tile positions relative to the center lines of the grid.
struct Geometry {
    orientation: Orientation,
    width: i32,
    height: i32,
}

impl Geometry {
    fn new(orientation: Orientation, width: u16, height: u16) -> Self {
        Self {
            orientation,
            width: i32::from(width),
            height: i32::from(height),
        }
    }

    fn projected(&self, index: usize) -> Option<Rect> {
        let (center_x, center_y) = (self.width / 2, self.height / 2);
        let step = index as i32 + 1;
        match self.orientation {
            Orientation::Horizontal => self.place(
                center_x - i32::from(BLOCK_WIDTH) * step,
                center_y - 5,
                i32::from(BLOCK_WIDTH) - 1,
            ),
            // bottom border sits right above the rule
            Orientation::Vertical => self.place(
                self.width - self.stride() * step,
                center_y - i32::from(TILE_HEIGHT),
                self.vertical_tile_width(),
            ),
        }
    }

    fn confirmed(&self, index: usize) -> Option<Rect> {
        let (center_x, center_y) = (self.width / 2, self.height / 2);
        match self.orientation {
            Orientation::Horizontal => self.place(
                center_x + i32::from(BLOCK_WIDTH) * index as i32 + 2,
                center_y - 5,
                i32::from(BLOCK_WIDTH) - 1,
            ),
            Orientation::Vertical => self.place(
                self.width - self.stride() * (index as i32 + 1),
                center_y + 1,
                self.vertical_tile_width(),
            ),
        }
    }

    fn separator(&self) -> Rect {
        let (width, height) = (self.width as u16, self.height as u16);
        match self.orientation {
            Orientation::Horizontal => Rect::new(width / 2, 0, width.min(1), height),
            Orientation::Vertical => Rect::new(0, height / 2, width, height.min(1)),
        }
    }

    /// Vertical layouts split the width in four columns.
    fn stride(&self) -> i32 {
        self.width / 4
    }

    fn vertical_tile_width(&self) -> i32 {
        i32::from(BLOCK_WIDTH).min(self.stride() - 1)
    }

    /// Tiles are clipped to the rows below the summary bar. Tiles that do not
    /// fit horizontally, or keep fewer than [`MIN_TILE_HEIGHT`] rows, are not
    /// placed.
    fn place(&self, x: i32, y: i32, width: i32) -> Option<Rect> {
        let top = y.max(SUMMARY_ROWS);
        let bottom = (y + i32::from(TILE_HEIGHT)).min(self.height);
        let fits = width > 2
            && x >= 0
            && x + width <= self.width
            && bottom - top >= i32::from(MIN_TILE_HEIGHT);
        fits.then(|| Rect::new(x as u16, top as u16, width as u16, (bottom - top) as u16))
    }
}
