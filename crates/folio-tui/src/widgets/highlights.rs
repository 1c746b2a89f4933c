use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
};

use crate::app::App;
use crate::image::{ImageView, PlaceholderImage};

use super::truncate_str;

/// Horizontally scrollable strip of story highlights
pub struct HighlightsWidget;

impl HighlightsWidget {
    pub const HEIGHT: u16 = 5;
    /// Columns taken by one highlight, gap included
    pub const ITEM_WIDTH: u16 = 13;

    /// Highlights that fit side by side in `width`, after the left margin
    pub fn visible_count(width: u16) -> usize {
        (width.saturating_sub(2) / Self::ITEM_WIDTH) as usize
    }

    pub fn render(area: Rect, buf: &mut Buffer, app: &App) {
        let theme = &app.theme;
        let profile = &app.config.profile;
        let image = PlaceholderImage::default();
        let label_style = Style::default().fg(theme.fg0);

        let visible = Self::visible_count(area.width);
        let first = app.highlight_scroll;
        let last = (first + visible).min(profile.highlight_count);

        for (slot, index) in (first..last).enumerate() {
            let x = area.x + 2 + slot as u16 * Self::ITEM_WIDTH;
            let swatch = Rect::new(x, area.y, Self::ITEM_WIDTH - 2, 3);
            image.render(&profile.highlight_image_url, swatch, buf, theme);

            let label = truncate_str(&format!("Highlight {}", index + 1), Self::ITEM_WIDTH as usize - 1);
            buf.set_string(x, area.y + 3, label, label_style);
        }

        // Hint that more highlights are off screen
        let muted = Style::default().fg(theme.muted);
        if first > 0 && area.width > 0 {
            buf.set_string(area.x, area.y + 1, "‹", muted);
        }
        if last < profile.highlight_count && area.width > 0 {
            buf.set_string(area.right() - 1, area.y + 1, "›", muted);
        }
    }
}
