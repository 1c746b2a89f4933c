use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::image::{ImageView, PlaceholderImage};

/// Avatar, counters, name, bio and the two profile buttons
pub struct ProfileHeaderWidget;

impl ProfileHeaderWidget {
    pub const HEIGHT: u16 = 10;

    const AVATAR_WIDTH: u16 = 10;
    const AVATAR_HEIGHT: u16 = 4;

    pub fn render(area: Rect, buf: &mut Buffer, app: &App) {
        let theme = &app.theme;
        let profile = &app.config.profile;
        let inner = Rect {
            x: area.x + 2,
            width: area.width.saturating_sub(4),
            ..area
        };
        if inner.width == 0 || area.height < Self::HEIGHT {
            return;
        }

        // Row 0 stays free for the refresh indicator
        let avatar = Rect::new(inner.x, area.y + 1, Self::AVATAR_WIDTH.min(inner.width), Self::AVATAR_HEIGHT);
        PlaceholderImage::default().render(&profile.avatar_url, avatar, buf, theme);

        let stats_area = Rect::new(
            avatar.right() + 2,
            area.y + 2,
            inner.right().saturating_sub(avatar.right() + 2),
            2,
        );
        let stats = [
            (profile.posts, "Posts"),
            (profile.followers, "Followers"),
            (profile.following, "Following"),
        ];
        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(stats_area);
        for ((count, label), column) in stats.iter().zip(columns.iter()) {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    count.to_string(),
                    Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*label, Style::default().fg(theme.muted))),
            ])
            .alignment(Alignment::Center)
            .render(*column, buf);
        }

        buf.set_stringn(
            inner.x,
            area.y + 5,
            &profile.display_name,
            inner.width as usize,
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        );

        Paragraph::new(profile.bio.as_str())
            .style(Style::default().fg(theme.fg0))
            .wrap(Wrap { trim: true })
            .render(Rect::new(inner.x, area.y + 6, inner.width, 2), buf);

        let buttons = Layout::horizontal([Constraint::Ratio(1, 2); 2])
            .spacing(1)
            .split(Rect::new(inner.x, area.y + 8, inner.width, 1));
        for (label, button) in ["Edit Profile", "Share Profile"].iter().zip(buttons.iter()) {
            Paragraph::new(*label)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(theme.fg1)
                        .bg(theme.bg2)
                        .add_modifier(Modifier::BOLD),
                )
                .render(*button, buf);
        }
    }
}
