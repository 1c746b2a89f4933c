use ratatui::{buffer::Buffer, layout::Rect};

use folio_core::content::{ContentItem, GridLayout};

use crate::image::{ImageView, PlaceholderImage};
use crate::theme::Theme;

use super::scroll_view::blit;

/// One category's items in a fixed-column grid
pub struct ContentGridWidget;

impl ContentGridWidget {
    /// Draw the rows of the grid between `clip_top` and
    /// `clip_top + area.height`. Rows outside that window are never drawn.
    pub fn render(
        items: &[ContentItem],
        layout: &GridLayout,
        area: Rect,
        clip_top: u16,
        buf: &mut Buffer,
        theme: &Theme,
    ) {
        if area.is_empty() || items.is_empty() {
            return;
        }
        let row_height = layout.row_height(area.width) as usize;
        let columns = layout.columns() as usize;
        let rows = layout.rows(items.len());

        let first_row = clip_top as usize / row_height;
        let last_row = ((clip_top as usize + area.height as usize - 1) / row_height).min(rows.saturating_sub(1));
        if first_row > last_row {
            return;
        }

        // Scratch covers whole rows so cut cells keep their proportions
        let span = ((last_row - first_row + 1) * row_height).min(u16::MAX as usize) as u16;
        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, span));
        let image = PlaceholderImage::with_gutter();
        let base_y = (first_row * row_height) as u16;

        let first_item = first_row * columns;
        let last_item = ((last_row + 1) * columns).min(items.len());
        for (index, item) in items.iter().enumerate().take(last_item).skip(first_item) {
            let cell = layout.cell_rect(index, area.width);
            let rect = Rect::new(cell.x, cell.y - base_y, cell.width, cell.height);
            image.render(&item.source_ref, rect, &mut scratch, theme);
        }

        blit(
            &scratch,
            buf,
            (area.x as i32, area.y as i32 + base_y as i32 - clip_top as i32),
            area,
        );
    }
}
