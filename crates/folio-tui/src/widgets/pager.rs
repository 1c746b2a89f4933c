use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::app::App;

use super::content_grid::ContentGridWidget;
use super::scroll_view::blit;

/// Horizontally paged content. While a swipe is in flight both
/// neighbouring panes are drawn side by side.
pub struct PagerWidget;

impl PagerWidget {
    pub fn render(area: Rect, clip_top: u16, buf: &mut Buffer, app: &App) {
        if area.is_empty() {
            return;
        }
        let pager = app.sync.pager();
        let position = pager.position();

        for (index, _) in pager.visible_pages() {
            let (Some(items), Some(category)) = (app.pane(index), app.catalog.get(index)) else {
                continue;
            };
            let left = ((index as f64 - position) * area.width as f64).round() as i32;

            if left == 0 {
                ContentGridWidget::render(items, &category.layout, area, clip_top, buf, &app.theme);
                continue;
            }

            let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, area.height));
            scratch.set_style(scratch.area, Style::default().bg(app.theme.bg0).fg(app.theme.fg0));
            ContentGridWidget::render(items, &category.layout, scratch.area, clip_top, &mut scratch, &app.theme);
            blit(&scratch, buf, (area.x as i32 + left, area.y as i32), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_core::AppConfig;
    use crate::image::PlaceholderImage;
    use crate::theme::Theme;

    #[test]
    fn test_drag_shows_both_panes() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        app.measure(Rect::new(0, 0, 60, 30));
        app.begin_drag(40);
        app.drag_to(10);

        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 8));
        PagerWidget::render(buf.area, 0, &mut buf, &app);

        // Half a page dragged: pane 0's first cell scrolled off, pane 1's
        // first cell starts mid-screen
        let first = app.pane(0).unwrap();
        let second = app.pane(1).unwrap();
        assert_eq!(
            buf[(0, 0)].bg,
            PlaceholderImage::color_for(&first[1].source_ref, &app.theme)
        );
        assert_eq!(
            buf[(30, 0)].bg,
            PlaceholderImage::color_for(&second[0].source_ref, &app.theme)
        );
    }
}
