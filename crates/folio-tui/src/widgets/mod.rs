mod content_grid;
mod highlights;
mod pager;
mod popup;
mod profile_header;
mod scroll_view;
mod status_bar;
pub mod tab_bar;

pub use content_grid::ContentGridWidget;
pub use highlights::HighlightsWidget;
pub use pager::PagerWidget;
pub use popup::PopupWidget;
pub use profile_header::ProfileHeaderWidget;
pub use scroll_view::{blit, ScrollViewWidget};
pub use status_bar::StatusBarWidget;
pub use tab_bar::{icon_glyph, TabBarWidget};

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
