//! Composes the profile sections into the outer scroll viewport
//!
//! Header, highlights and tab bar render into a scratch buffer of their full
//! height and are copied in clipped; the content pane renders only the grid
//! rows that are visible.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::Frame;

use folio_core::scroll::{Placement, SectionKind};

use crate::app::App;

use super::{HighlightsWidget, PagerWidget, ProfileHeaderWidget, TabBarWidget};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct ScrollViewWidget;

impl ScrollViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let buf = frame.buffer_mut();
        let base = Style::default().bg(app.theme.bg0).fg(app.theme.fg0);
        buf.set_style(area, base);

        for placement in app.scroller.layout() {
            let target = Rect::new(area.x, area.y + placement.y, area.width, placement.height)
                .intersection(area);
            if target.is_empty() {
                continue;
            }
            match placement.kind {
                SectionKind::Header => Self::render_clipped(
                    buf,
                    target,
                    placement,
                    ProfileHeaderWidget::HEIGHT,
                    base,
                    |area, scratch| ProfileHeaderWidget::render(area, scratch, app),
                ),
                SectionKind::Highlights => Self::render_clipped(
                    buf,
                    target,
                    placement,
                    HighlightsWidget::HEIGHT,
                    base,
                    |area, scratch| HighlightsWidget::render(area, scratch, app),
                ),
                SectionKind::TabBar => Self::render_clipped(
                    buf,
                    target,
                    placement,
                    TabBarWidget::HEIGHT,
                    base,
                    |area, scratch| TabBarWidget::render(area, scratch, app),
                ),
                SectionKind::Content => PagerWidget::render(target, placement.clip_top, buf, app),
            }
        }

        Self::render_refresh_overlay(area, buf, app);
    }

    fn render_clipped(
        buf: &mut Buffer,
        target: Rect,
        placement: Placement,
        full_height: u16,
        base: Style,
        draw: impl FnOnce(Rect, &mut Buffer),
    ) {
        let mut scratch = Buffer::empty(Rect::new(0, 0, target.width, full_height));
        scratch.set_style(scratch.area, base);
        draw(scratch.area, &mut scratch);
        blit(
            &scratch,
            buf,
            (
                target.x as i32,
                target.y as i32 - placement.clip_top as i32,
            ),
            target,
        );
    }

    /// Pull progress or refresh spinner. Drawn on the top row at the top of
    /// the list, otherwise on the bottom row so the pinned tab bar stays clear.
    fn render_refresh_overlay(area: Rect, buf: &mut Buffer, app: &App) {
        if area.height == 0 {
            return;
        }
        let text = if app.is_refreshing() {
            format!("{} Refreshing", SPINNER[app.spinner_frame % SPINNER.len()])
        } else {
            let progress = app.scroller.pull_progress();
            if progress <= 0.0 {
                return;
            }
            let filled = (progress * 5.0).round() as usize;
            format!("Pull to refresh {}{}", "●".repeat(filled), "○".repeat(5 - filled))
        };
        let width = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = if app.scroller.scroll() == 0 {
            area.y
        } else {
            area.bottom() - 1
        };
        buf.set_string(
            x,
            y,
            text,
            Style::default()
                .fg(app.theme.info)
                .bg(app.theme.bg0)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Copy every cell of `src` moved by `offset` into `dst`, keeping only
/// cells that land inside `clip`
pub fn blit(src: &Buffer, dst: &mut Buffer, offset: (i32, i32), clip: Rect) {
    let clip = clip.intersection(dst.area);
    let area = src.area;
    for y in area.top()..area.bottom() {
        let ty = y as i32 + offset.1;
        if ty < clip.top() as i32 || ty >= clip.bottom() as i32 {
            continue;
        }
        for x in area.left()..area.right() {
            let tx = x as i32 + offset.0;
            if tx < clip.left() as i32 || tx >= clip.right() as i32 {
                continue;
            }
            if let (Some(cell), Some(slot)) = (
                src.cell(Position::new(x, y)),
                dst.cell_mut(Position::new(tx as u16, ty as u16)),
            ) {
                *slot = cell.clone();
            }
        }
    }
}
