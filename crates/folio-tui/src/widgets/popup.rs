use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use folio_core::config::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Key reference overlay
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries = help_entries(keymap);
        let area = frame.area();

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().fg(theme.indicator).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.fg0);
        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(format!(" {:<14}", keys), key_style),
                    Span::styled(description, text_style),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled("any key to close", Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn help_entries(keymap: &KeymapConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("1-9 {}/{}", keymap.next_tab, keymap.prev_tab), "select tab"),
        (format!("{} {}", keymap.swipe_prev, keymap.swipe_next), "swipe content"),
        (format!("{} {}", keymap.scroll_down, keymap.scroll_up), "scroll"),
        (
            format!("{} {}", keymap.scroll_half_down, keymap.scroll_half_up),
            "half page",
        ),
        (
            format!("{} {}", keymap.scroll_page_down, keymap.scroll_page_up),
            "full page",
        ),
        (
            format!("{} {}", keymap.jump_to_top, keymap.jump_to_bottom),
            "top / bottom",
        ),
        (
            format!("{} {}", keymap.highlights_left, keymap.highlights_right),
            "scroll highlights",
        ),
        (keymap.refresh.clone(), "refresh"),
        (keymap.help.clone(), "toggle help"),
        (keymap.quit.clone(), "quit"),
        ("mouse".to_string(), "click tab, drag, wheel"),
    ]
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
