use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    fee_distribution::FeeDistribution,
    layout::{
        fee_overlay_area, fee_overlay_lines, fee_overlay_title, search_overlay_area,
        DashboardLayout, LineTone, Orientation, Tile, TileKind, SEARCH_OVERLAY_TITLE,
    },
};

/// Overlay to draw on top of the dashboard, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayView<'a> {
    None,
    FeeDistribution(FeeDistribution),
    TxSearch(&'a str),
}

/// Draws one full frame.
pub fn draw_dashboard(frame: &mut Frame<'_>, layout: &DashboardLayout, overlay: &OverlayView<'_>) {
    if layout.loading {
        draw_placeholder(frame, layout.area);
    } else {
        draw_separator(frame, layout);
        for tile in &layout.tiles {
            draw_tile(frame, tile);
        }
        draw_summary(frame, layout);
    }
    draw_help(frame, layout);

    match overlay {
        OverlayView::None => {}
        OverlayView::FeeDistribution(distribution) => draw_fee_overlay(frame, layout, distribution),
        OverlayView::TxSearch(text) => draw_search_overlay(frame, layout, text),
    }
}

fn draw_placeholder(frame: &mut Frame<'_>, area: Rect) {
    let row = Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1));
    let widget = Paragraph::new("Loading mempool data...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(widget, row);
}

fn draw_separator(frame: &mut Frame<'_>, layout: &DashboardLayout) {
    let area = layout.separator;
    let lines: Vec<Line<'_>> = match layout.orientation {
        Orientation::Horizontal => (0..area.height).map(|_| Line::from("|")).collect(),
        Orientation::Vertical => vec![Line::from("-".repeat(usize::from(area.width)))],
    };
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_tile(frame: &mut Frame<'_>, tile: &Tile) {
    let content = &tile.content;
    let inner_width = usize::from(tile.area.width.saturating_sub(2));
    let emphasis = match content.kind {
        TileKind::Confirmed => Color::Blue,
        TileKind::Projected => Color::Red,
    };

    let lines: Vec<Line<'_>> = content
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut style = match line.tone {
                LineTone::Fee | LineTone::Plain => Style::default().fg(Color::White),
                LineTone::FeeRange => Style::default().fg(Color::Yellow),
            };
            if content.is_emphasized(i) {
                style = style.bg(emphasis);
            }
            // pad so the background covers the whole row
            Line::from(Span::styled(
                format!("{:^width$}", line.text, width = inner_width),
                style,
            ))
        })
        .collect();

    let mut block = Block::default().borders(Borders::ALL);
    if let Some(title) = &content.title {
        block = block.title(title.clone());
    }
    if content.highlighted {
        block = block.border_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    }
    frame.render_widget(Paragraph::new(lines).block(block), tile.area);
}

fn draw_summary(frame: &mut Frame<'_>, layout: &DashboardLayout) {
    let Some(summary) = &layout.summary else {
        return;
    };
    let row = Rect::new(layout.area.x, layout.area.y, layout.area.width, layout.area.height.min(1));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            summary.clone(),
            Style::default().fg(Color::Cyan),
        )))
        .alignment(Alignment::Center),
        row,
    );
}

/// Skipped when a tile reaches the bottom row.
fn draw_help(frame: &mut Frame<'_>, layout: &DashboardLayout) {
    let area = layout.area;
    if area.height < 2 {
        return;
    }
    let bottom = area.y + area.height - 1;
    if layout
        .tiles
        .iter()
        .any(|tile| tile.area.y + tile.area.height > bottom)
    {
        return;
    }
    let key = Style::default().fg(Color::Yellow);
    let help = Line::from(vec![
        Span::styled("[q]", key),
        Span::raw(" Quit  "),
        Span::styled("[f]", key),
        Span::raw(" Track tx  "),
        Span::styled("[1-9]", key),
        Span::raw(" Projected fees  "),
        Span::styled("[click]", key),
        Span::raw(" Block fees  "),
        Span::styled("[esc]", key),
        Span::raw(" Close"),
    ]);
    let row = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), row);
}

fn draw_fee_overlay(frame: &mut Frame<'_>, layout: &DashboardLayout, distribution: &FeeDistribution) {
    if !distribution.is_visible() {
        return;
    }
    let area = fee_overlay_area(layout.area.width, layout.area.height);
    let lines: Vec<Line<'_>> = fee_overlay_lines(distribution)
        .into_iter()
        .map(Line::from)
        .collect();
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(fee_overlay_title(distribution))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn draw_search_overlay(frame: &mut Frame<'_>, layout: &DashboardLayout, text: &str) {
    let area = search_overlay_area(layout.area.width, layout.area.height);
    let widget = Paragraph::new(text.to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(SEARCH_OVERLAY_TITLE),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);

    let max_x = (area.x + area.width).saturating_sub(2);
    let cursor_x = (area.x + 1).saturating_add(text.chars().count() as u16).min(max_x);
    frame.set_cursor_position((cursor_x, area.y + 1));
}
