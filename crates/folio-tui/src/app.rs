use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use folio_core::content::{Catalog, Category, ContentItem};
use folio_core::nav::TabSync;
use folio_core::scroll::{
    FixedDelayRefresher, RefreshFuture, Refresher, SectionKind, StickyRefreshScroller, ViewTree,
};
use folio_core::{AppConfig, Result};
use ratatui::layout::{Position, Rect};
use tracing::{debug, warn};

use crate::event::RefreshResult;
use crate::theme::Theme;
use crate::widgets::{HighlightsWidget, ProfileHeaderWidget, TabBarWidget};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Profile screen state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub catalog: Catalog,
    /// Tab bar, underline and pager
    pub sync: TabSync,
    /// Outer scroll with the sticky tab bar and pull-to-refresh
    pub scroller: StickyRefreshScroller,
    refresher: Arc<dyn Refresher>,
    /// Items per pane, generated the first time the pane mounts
    panes: Vec<Option<Vec<ContentItem>>>,
    /// First visible highlight
    pub highlight_scroll: usize,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Spinner animation frame for the refresh indicator
    pub spinner_frame: usize,
    pub last_refreshed: Option<DateTime<Local>>,
    /// Screen area above the status bar, set by `measure`
    pub view_area: Rect,
    /// Last column seen during a mouse drag
    drag_column: Option<u16>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Result<Self> {
        let catalog = Catalog::from_config(&config.content, config.ui.cell_vertical_scale)?;
        let sync = TabSync::new(
            catalog.tabs(),
            config.ui.indicator.clone(),
            config.ui.pager.clone(),
        )?;
        let scroller = StickyRefreshScroller::new(config.ui.scroll.clone(), &config.refresh);
        let refresher: Arc<dyn Refresher> =
            Arc::new(FixedDelayRefresher::from_config(&config.refresh));

        let mut app = Self {
            panes: vec![None; catalog.len()],
            config,
            theme,
            catalog,
            sync,
            scroller,
            refresher,
            highlight_scroll: 0,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            spinner_frame: 0,
            last_refreshed: None,
            view_area: Rect::default(),
            drag_column: None,
        };
        app.mount_panes();
        Ok(app)
    }

    /// Swap the refresh collaborator
    pub fn with_refresher(mut self, refresher: Arc<dyn Refresher>) -> Self {
        self.refresher = refresher;
        self
    }

    pub fn active_index(&self) -> usize {
        self.sync.active_index()
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.catalog.get(self.active_index())
    }

    /// Items of a mounted pane
    pub fn pane(&self, index: usize) -> Option<&[ContentItem]> {
        self.panes.get(index)?.as_deref()
    }

    /// Generate items for panes the pager has mounted since the last call
    fn mount_panes(&mut self) {
        let mounted: Vec<usize> = self.sync.pager().mounted_panes().collect();
        for index in mounted {
            if let (Some(slot), Some(category)) = (self.panes.get_mut(index), self.catalog.get(index)) {
                if slot.is_none() {
                    debug!(index, key = %category.tab.key, "mounting pane");
                    *slot = Some(category.items());
                }
            }
        }
    }

    /// Record the terminal size. The last row belongs to the status bar.
    pub fn measure(&mut self, area: Rect) {
        let view = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        if view != self.view_area {
            debug!(width = view.width, height = view.height, "measured profile view");
        }
        self.view_area = view;
        let width = view.width as f64;
        self.sync.measure_at(width, width, Instant::now());
        self.rebuild_tree();
        self.clamp_highlight_scroll();
    }

    /// Section heights for the current width. While the pager is between
    /// pages, the taller pane decides the content height.
    fn rebuild_tree(&mut self) {
        let width = self.view_area.width;
        let content_height = self
            .sync
            .pager()
            .visible_pages()
            .iter()
            .filter_map(|(index, _)| self.catalog.get(*index))
            .map(|category| category.content_height(width))
            .max()
            .unwrap_or(0);

        self.scroller.set_tree(
            ViewTree::new()
                .with_section(SectionKind::Header, ProfileHeaderWidget::HEIGHT)
                .with_section(SectionKind::Highlights, HighlightsWidget::HEIGHT)
                .with_sticky(SectionKind::TabBar, TabBarWidget::HEIGHT)
                .with_section(SectionKind::Content, content_height),
        );
        self.scroller.set_viewport(self.view_area.height);
    }

    /// Advance every animation to now
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        match self.sync.tick_at(now) {
            Ok(Some(result)) => {
                debug!(
                    previous = result.previous,
                    index = result.index,
                    "tab changed by swipe"
                );
            }
            Ok(None) => {}
            Err(e) => warn!("Swipe report rejected: {}", e),
        }
        self.mount_panes();
        self.rebuild_tree();
        self.scroller.update_at(now);
    }

    /// Check if there's pending animation work.
    /// Use this to determine if we need high frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.sync.needs_update() || self.scroller.needs_update()
    }

    // Tabs

    pub fn select_tab(&mut self, index: usize) {
        match self.sync.tap_at(index, Instant::now()) {
            Ok(result) if result.changed => {
                debug!(previous = result.previous, index, "tab selected");
            }
            Ok(_) => {}
            Err(e) => debug!("Ignoring tab selection: {}", e),
        }
        self.mount_panes();
    }

    pub fn next_tab(&mut self) {
        self.tap_relative(1);
    }

    pub fn prev_tab(&mut self) {
        self.tap_relative(-1);
    }

    fn tap_relative(&mut self, step: isize) {
        if let Err(e) = self.sync.tap_relative_at(step, Instant::now()) {
            debug!("Ignoring tab step: {}", e);
        }
        self.mount_panes();
    }

    /// Keyboard swipe of one full page
    pub fn swipe(&mut self, direction: i8) {
        self.sync.swipe_page_at(direction, Instant::now());
        self.mount_panes();
    }

    pub fn begin_drag(&mut self, column: u16) {
        self.sync.begin_swipe_at(Instant::now());
        self.drag_column = Some(column);
        self.mount_panes();
    }

    pub fn drag_to(&mut self, column: u16) {
        let Some(last) = self.drag_column else {
            return;
        };
        self.sync.swipe_by(column as f64 - last as f64);
        self.drag_column = Some(column);
    }

    pub fn end_drag(&mut self) {
        if self.drag_column.take().is_some() {
            self.sync.end_swipe_at(Instant::now());
            self.mount_panes();
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_column.is_some()
    }

    // Outer scroll

    pub fn scroll_down(&mut self) {
        self.scroller.line_down();
    }

    /// Returns true when the scroll turned into a pull past the threshold
    pub fn scroll_up(&mut self) -> bool {
        self.scroller.line_up()
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroller.half_page_down();
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroller.half_page_up();
    }

    pub fn scroll_page_down(&mut self) {
        self.scroller.page_down();
    }

    pub fn scroll_page_up(&mut self) {
        self.scroller.page_up();
    }

    pub fn jump_to_top(&mut self) {
        self.scroller.scroll_to_top_at(Instant::now());
    }

    pub fn jump_to_bottom(&mut self) {
        self.scroller.scroll_to_bottom_at(Instant::now());
    }

    // Highlights

    fn max_highlight_scroll(&self) -> usize {
        let visible = HighlightsWidget::visible_count(self.view_area.width);
        self.config.profile.highlight_count.saturating_sub(visible)
    }

    fn clamp_highlight_scroll(&mut self) {
        self.highlight_scroll = self.highlight_scroll.min(self.max_highlight_scroll());
    }

    pub fn highlights_left(&mut self) {
        self.highlight_scroll = self.highlight_scroll.saturating_sub(1);
    }

    pub fn highlights_right(&mut self) {
        self.highlight_scroll = (self.highlight_scroll + 1).min(self.max_highlight_scroll());
    }

    // Refresh

    pub fn is_refreshing(&self) -> bool {
        self.scroller.is_refreshing()
    }

    /// Begin a refresh; the caller drives the returned future.
    /// `None` when one is already running.
    pub fn start_refresh(&mut self) -> Option<RefreshFuture> {
        let future = self.scroller.trigger_refresh(&self.refresher)?;
        self.spinner_frame = 0;
        self.clear_status();
        Some(future)
    }

    pub fn finish_refresh(&mut self, result: RefreshResult) {
        match result {
            RefreshResult::Success { finished_at } => {
                self.scroller.complete_refresh(Ok(()));
                self.last_refreshed = Some(finished_at);
            }
            RefreshResult::Failure { error } => {
                self.set_status(format!("Refresh failed: {}", error));
                self.scroller.complete_refresh(Err(error));
            }
        }
    }

    /// Tick spinner animation (call on each tick event)
    pub fn tick_spinner(&mut self) {
        if self.is_refreshing() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // Hit testing

    /// Section and section row under a screen cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(SectionKind, u16)> {
        if !self.view_area.contains(Position::new(column, row)) {
            return None;
        }
        self.scroller.tree().hit_test(
            row - self.view_area.y,
            self.scroller.scroll(),
            self.view_area.height,
        )
    }

    /// Tab cell under a screen column
    pub fn tab_at_column(&self, column: u16) -> Option<usize> {
        let area = self.view_area;
        if column < area.x || column >= area.x + area.width {
            return None;
        }
        TabBarWidget::cell_at(column - area.x, self.sync.tab_count(), area.width)
    }

    /// Screen row where a section currently starts, if visible
    pub fn section_row(&self, kind: SectionKind) -> Option<u16> {
        self.scroller
            .layout()
            .into_iter()
            .find(|p| p.kind == kind)
            .map(|p| self.view_area.y + p.y)
    }

    // Modes and status

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Help,
            Mode::Help => Mode::Normal,
        };
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
        self.clear_status();
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default()).unwrap();
        app.measure(Rect::new(0, 0, 60, 30));
        app
    }

    fn settle(app: &mut App) {
        app.update_at(Instant::now() + Duration::from_secs(2));
    }

    #[test]
    fn test_initial_panes() {
        let app = app();
        assert_eq!(app.active_index(), 0);
        assert_eq!(app.pane(0).map(<[_]>::len), Some(21));
        assert!(app.pane(1).is_some());
        assert!(app.pane(2).is_none());
    }

    #[test]
    fn test_select_tab_moves_pager() {
        let mut app = app();
        app.select_tab(2);
        assert_eq!(app.active_index(), 2);
        settle(&mut app);
        assert_eq!(app.sync.pager().current_index(), 2);
        assert!(app.sync.is_consistent());
        assert!(app.pane(2).is_some());
    }

    #[test]
    fn test_out_of_range_tab_is_ignored() {
        let mut app = app();
        app.select_tab(7);
        assert_eq!(app.active_index(), 0);
    }

    #[test]
    fn test_keyboard_swipe() {
        let mut app = app();
        app.swipe(1);
        settle(&mut app);
        assert_eq!(app.active_index(), 1);
        app.swipe(-1);
        settle(&mut app);
        assert_eq!(app.active_index(), 0);
    }

    #[test]
    fn test_mouse_drag_past_threshold() {
        let mut app = app();
        app.begin_drag(50);
        app.drag_to(10);
        app.end_drag();
        settle(&mut app);
        assert_eq!(app.active_index(), 1);
        assert!(!app.is_dragging());
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut app = app();
        app.begin_drag(50);
        app.drag_to(40);
        app.end_drag();
        settle(&mut app);
        assert_eq!(app.active_index(), 0);
    }

    #[test]
    fn test_tab_bar_pins_at_bottom() {
        let mut app = app();
        app.jump_to_bottom();
        settle(&mut app);
        assert!(app.scroller.is_pinned());
        assert_eq!(app.section_row(SectionKind::TabBar), Some(0));
    }

    #[test]
    fn test_pull_starts_single_refresh() {
        let mut app = app();
        let mut pulled = false;
        for _ in 0..app.config.refresh.pull_threshold {
            pulled = app.scroll_up();
        }
        assert!(pulled);
        assert!(app.start_refresh().is_some());
        assert!(app.start_refresh().is_none());

        app.finish_refresh(RefreshResult::from_outcome(Ok(())));
        assert!(!app.is_refreshing());
        assert!(app.last_refreshed.is_some());
    }

    #[test]
    fn test_failed_refresh_sets_status() {
        let mut app = app();
        let _future = app.start_refresh();
        app.finish_refresh(RefreshResult::from_outcome(Err(folio_core::Error::Refresh(
            "offline".into(),
        ))));
        assert!(!app.is_refreshing());
        assert!(app.status_message.as_deref().unwrap_or("").contains("offline"));
    }

    #[test]
    fn test_tab_click_matches_drawn_cells() {
        let mut app = app();
        app.measure(Rect::new(0, 0, 62, 30));
        // The drawn cells split at 21 and 41, so column 41 belongs to tab 2
        assert_eq!(app.tab_at_column(20), Some(0));
        assert_eq!(app.tab_at_column(21), Some(1));
        assert_eq!(app.tab_at_column(41), Some(2));
        assert_eq!(app.tab_at_column(62), None);
    }

    #[test]
    fn test_highlight_scroll_is_clamped() {
        let mut app = app();
        for _ in 0..50 {
            app.highlights_right();
        }
        let visible = HighlightsWidget::visible_count(60);
        assert_eq!(app.highlight_scroll, 10 - visible);
        app.highlights_left();
        assert_eq!(app.highlight_scroll, 9 - visible);
    }
}
