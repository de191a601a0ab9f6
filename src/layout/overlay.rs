use ratatui::layout::Rect;

use super::ceil;
use crate::fee_distribution::{FeeDistribution, FetchPhase};

pub const FEE_OVERLAY_WIDTH: u16 = 41;
pub const FEE_OVERLAY_HEIGHT: u16 = 7;
pub const SEARCH_OVERLAY_WIDTH: u16 = 71;
pub const SEARCH_OVERLAY_HEIGHT: u16 = 3;

/// A `width` x `height` box centered on the grid, clipped to it.
pub fn centered(width: u16, height: u16, area_width: u16, area_height: u16) -> Rect {
    let area = Rect::new(0, 0, area_width, area_height);
    let x = (area_width / 2).saturating_sub(width / 2);
    let y = (area_height / 2).saturating_sub(height / 2);
    Rect::new(x, y, width, height).intersection(area)
}

pub fn fee_overlay_area(area_width: u16, area_height: u16) -> Rect {
    centered(FEE_OVERLAY_WIDTH, FEE_OVERLAY_HEIGHT, area_width, area_height)
}

pub fn search_overlay_area(area_width: u16, area_height: u16) -> Rect {
    centered(SEARCH_OVERLAY_WIDTH, SEARCH_OVERLAY_HEIGHT, area_width, area_height)
}

pub fn fee_overlay_title(distribution: &FeeDistribution) -> String {
    match distribution.target {
        Some(target) => format!("Fee distribution {} ('esc' to close)", target),
        None => "Fee distribution ('esc' to close)".to_string(),
    }
}

/// Body of the fee distribution overlay.
pub fn fee_overlay_lines(distribution: &FeeDistribution) -> Vec<String> {
    match &distribution.phase {
        FetchPhase::Idle => vec![],
        FetchPhase::Loading => vec!["Loading...".to_string()],
        FetchPhase::Error(reason) => vec![
            "Failed to load fee distribution".to_string(),
            reason.clone(),
        ],
        FetchPhase::Ready => match distribution.stats() {
            Some(stats) => vec![
                format!("Fee span: {} - {} sat/vByte", ceil(stats.min), ceil(stats.max)),
                format!("Tx count: {} transactions", stats.tx_count),
                format!("Median:   ~{} sat/vBytes", ceil(stats.median)),
            ],
            None => vec![],
        },
    }
}

pub const SEARCH_OVERLAY_TITLE: &str = "Track transaction (txid)";
