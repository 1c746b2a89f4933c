//! Tab bar with the animated underline

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

use super::truncate_str;

/// Terminal glyph for an icon name
pub fn icon_glyph(icon_ref: &str) -> &'static str {
    match icon_ref {
        "grid-on" | "grid" => "▦",
        "video-library" | "video" | "reels" => "▶",
        "tag" | "tagged" => "#",
        "bookmark" => "⚑",
        "heart" | "favorite" => "♥",
        "star" => "★",
        _ => "•",
    }
}

pub struct TabBarWidget;

impl TabBarWidget {
    /// Label row plus underline row
    pub const HEIGHT: u16 = 2;

    /// Columns `[left, right)` of tab `index`, relative to the bar
    pub fn cell_span(index: usize, count: usize, width: u16) -> (u16, u16) {
        let cell = width as f64 / count.max(1) as f64;
        let left = (index as f64 * cell).round() as u16;
        let right = ((index + 1) as f64 * cell).round() as u16;
        (left.min(width), right.min(width))
    }

    /// Tab whose cell contains `column` (relative to the bar)
    pub fn cell_at(column: u16, count: usize, width: u16) -> Option<usize> {
        (0..count).find(|&index| {
            let (left, right) = Self::cell_span(index, count, width);
            (left..right).contains(&column)
        })
    }

    pub fn render(area: Rect, buf: &mut Buffer, app: &App) {
        let theme = &app.theme;
        let controller = app.sync.controller();
        let count = controller.len();
        if area.width == 0 || area.height < Self::HEIGHT || count == 0 {
            return;
        }

        for (index, tab) in controller.tabs().iter().enumerate() {
            let (start, end) = Self::cell_span(index, count, area.width);
            let left = area.x + start;
            let width = end - start;

            let style = if controller.is_active(index) {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            let label = truncate_str(
                &format!("{} {}", icon_glyph(&tab.icon_ref), tab.title),
                width as usize,
            );
            let label_width = (label.width() as u16).min(width);
            buf.set_stringn(
                left + (width - label_width) / 2,
                area.y,
                &label,
                width as usize,
                style,
            );
        }

        // Baseline, then the underline on top of it
        let baseline = area.y + 1;
        let line_style = Style::default().fg(theme.bg2);
        for x in area.left()..area.right() {
            buf.set_string(x, baseline, "─", line_style);
        }

        let Some(geometry) = controller.geometry() else {
            return;
        };
        let Some(offset) = controller.indicator().current_offset() else {
            return;
        };
        let start = offset.round().max(0.0) as u16;
        let end = (offset + geometry.indicator_width()).round().max(0.0) as u16;
        let indicator_style = Style::default().fg(theme.indicator);
        for x in start..end.min(area.width) {
            buf.set_string(area.x + x, baseline, "━", indicator_style);
        }
    }
}
