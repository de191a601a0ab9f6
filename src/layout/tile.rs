use super::{ceil, format_block_size, format_elapsed};
use crate::mempool_manager::{ConfirmedBlock, ProjectedBlock};

/// Consensus weight limit of one block.
pub const BLOCK_WEIGHT_CAPACITY: u64 = 4_000_000;
/// Text lines inside a tile border.
pub const TILE_LINES: usize = 9;
/// Projected positions that get an ETA instead of a block count.
pub const ETA_POSITIONS: usize = 3;
/// Expected minutes between blocks.
const BLOCK_INTERVAL_MINUTES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Confirmed,
    Projected,
}

/// Color hint for a tile line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTone {
    Plain,
    Fee,
    FeeRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLine {
    pub text: String,
    pub tone: LineTone,
}

impl TileLine {
    fn new(text: impl Into<String>, tone: LineTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn blank() -> Self {
        Self::new("", LineTone::Plain)
    }
}

/// Everything drawn inside one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileContent {
    pub kind: TileKind,
    pub title: Option<String>,
    pub lines: Vec<TileLine>,
    /// Number of trailing lines drawn with the emphasized background.
    pub emphasized: usize,
    /// Set when the tile holds the tracked transaction.
    pub highlighted: bool,
}

impl TileContent {
    pub fn is_emphasized(&self, line: usize) -> bool {
        line + self.emphasized >= self.lines.len()
    }
}

/// A block record to be drawn, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum BlockTile<'a> {
    Confirmed(&'a ConfirmedBlock),
    Projected {
        index: usize,
        block: &'a ProjectedBlock,
    },
}

/// How many trailing lines of a `line_count` tall tile to emphasize for a
/// block of `weight`.
pub fn emphasized_lines(weight: u64, capacity: u64, line_count: usize) -> usize {
    if capacity == 0 {
        return line_count;
    }
    let ratio = weight as f64 / capacity as f64;
    if ratio <= 0.0 {
        0
    } else if ratio >= 1.0 {
        line_count
    } else {
        (ratio * line_count as f64) as usize
    }
}

/// Builds the tile text for a block. `now` is the current unix time in seconds.
pub fn tile_content(tile: BlockTile<'_>, now: i64, highlighted: bool) -> TileContent {
    match tile {
        BlockTile::Confirmed(block) => TileContent {
            kind: TileKind::Confirmed,
            title: Some(format!("#{}", block.height)),
            lines: block_lines(
                block.median_fee,
                block.min_fee,
                block.max_fee,
                block.size,
                block.n_tx,
                format!("{} ago", format_elapsed(now - block.time)),
            ),
            emphasized: emphasized_lines(block.weight, BLOCK_WEIGHT_CAPACITY, TILE_LINES),
            highlighted,
        },
        BlockTile::Projected { index, block } => {
            let (footer, emphasized) = if index < ETA_POSITIONS {
                (
                    format!("in ~{} minutes", (index + 1) * BLOCK_INTERVAL_MINUTES),
                    emphasized_lines(block.block_weight, BLOCK_WEIGHT_CAPACITY, TILE_LINES),
                )
            } else {
                // the last projected block aggregates the rest of the mempool
                let blocks = ceil(block.block_weight as f64 / BLOCK_WEIGHT_CAPACITY as f64);
                (format!("+{} blocks", blocks), 0)
            };
            TileContent {
                kind: TileKind::Projected,
                title: None,
                lines: block_lines(
                    block.median_fee,
                    block.min_fee,
                    block.max_fee,
                    block.block_size,
                    block.n_tx,
                    footer,
                ),
                emphasized,
                highlighted,
            }
        }
    }
}

fn block_lines(
    median_fee: f64,
    min_fee: f64,
    max_fee: f64,
    size: u64,
    n_tx: u64,
    footer: String,
) -> Vec<TileLine> {
    vec![
        TileLine::new(format!("~{} sat/vB", ceil(median_fee)), LineTone::Fee),
        TileLine::new(
            format!("{}-{} sat/vB", ceil(min_fee), ceil(max_fee)),
            LineTone::FeeRange,
        ),
        TileLine::blank(),
        TileLine::new(format_block_size(size), LineTone::Plain),
        TileLine::new(format!("{:4} transactions", n_tx), LineTone::Plain),
        TileLine::blank(),
        TileLine::blank(),
        TileLine::blank(),
        TileLine::new(footer, LineTone::Plain),
    ]
}
