use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let tab_title = app
            .active_category()
            .map(|c| c.tab.title.as_str())
            .unwrap_or("");

        let (refresh_str, refresh_color) = if app.is_refreshing() {
            ("Refreshing...".to_string(), theme.info)
        } else if let Some(at) = app.last_refreshed {
            (format!("Updated {}", at.format("%H:%M:%S")), theme.success)
        } else {
            (String::new(), theme.fg0)
        };

        // A status message replaces the whole left side
        let (status_text, status_style) = if let Some(msg) = &app.status_message {
            (format!(" {}", msg), Style::default().fg(theme.error).bg(theme.bg2))
        } else {
            (
                format!(
                    " {} | {} {}/{}",
                    mode_str,
                    tab_title,
                    app.active_index() + 1,
                    app.sync.tab_count()
                ),
                Style::default().fg(theme.fg0).bg(theme.bg2),
            )
        };
        let refresh_text = if app.status_message.is_none() && !refresh_str.is_empty() {
            format!(" | {}", refresh_str)
        } else {
            String::new()
        };

        let help_hint = " q:quit 1-9/Tab:tabs h/l:swipe j/k:scroll r:refresh ?:help ";
        let padding_len = area
            .width
            .saturating_sub(
                status_text.width() as u16 + refresh_text.width() as u16 + help_hint.width() as u16,
            ) as usize;

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(refresh_text, Style::default().fg(refresh_color).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
