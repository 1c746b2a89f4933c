//! Drawing images referenced by URL
//!
//! Terminals can't fetch and decode remote images in general, so the
//! default view draws a deterministic swatch per URL instead.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Draws the image behind `source` into `area`
pub trait ImageView {
    fn render(&self, source: &str, area: Rect, buf: &mut Buffer, theme: &Theme);
}

/// Colour swatch keyed by the source URL, with a short label
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImage {
    /// Leave a one-cell gutter on the right and bottom edges
    pub gutter: bool,
}

impl PlaceholderImage {
    pub fn with_gutter() -> Self {
        Self { gutter: true }
    }

    /// Same URL, same colour
    pub fn color_for(source: &str, theme: &Theme) -> Color {
        let palette = theme.palette();
        palette[(fnv1a(source.as_bytes()) % palette.len() as u64) as usize]
    }

    /// Trailing number of the URL (`...?random=52` -> `52`), or its last
    /// path segment
    pub fn label_for(source: &str) -> &str {
        let digits = source
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| &source[i..]);
        digits.unwrap_or_else(|| {
            source
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(source)
        })
    }
}

impl ImageView for PlaceholderImage {
    fn render(&self, source: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let mut swatch = area;
        if self.gutter {
            if swatch.width > 2 {
                swatch.width -= 1;
            }
            if swatch.height > 1 {
                swatch.height -= 1;
            }
        }

        let color = Self::color_for(source, theme);
        buf.set_style(swatch, Style::default().bg(color));

        let label = Self::label_for(source);
        let label_width = label.width() as u16;
        if label_width == 0 || label_width > swatch.width {
            return;
        }
        let x = swatch.x + (swatch.width - label_width) / 2;
        let y = swatch.y + swatch.height / 2;
        buf.set_string(
            x,
            y,
            label,
            Style::default()
                .fg(theme.bg0)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ *b as u64).wrapping_mul(PRIME))
}
