//! Outer vertical scroll with a sticky tab bar and pull-to-refresh

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::animation::ScrollAnimator;
use super::refresh::{RefreshCallback, RefreshState, Refresher};
use super::sticky::{Placement, ViewTree};
use crate::config::{RefreshConfig, ScrollConfig};
use crate::error::Result;

/// Future returned by `trigger_refresh`; the host decides where to drive it
pub type RefreshFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

#[derive(Debug)]
pub struct StickyRefreshScroller {
    tree: ViewTree,
    animator: ScrollAnimator,
    refresh: RefreshState,
    viewport: u16,
    /// Rows pulled past the top since the last refresh or downward scroll
    pull: u16,
    pull_threshold: u16,
}

impl StickyRefreshScroller {
    pub fn new(scroll: ScrollConfig, refresh: &RefreshConfig) -> Self {
        Self {
            tree: ViewTree::new(),
            animator: ScrollAnimator::new(scroll),
            refresh: RefreshState::new(),
            viewport: 0,
            pull: 0,
            pull_threshold: refresh.pull_threshold.max(1),
        }
    }

    /// Replace the section tree, e.g. after a resize or tab change
    pub fn set_tree(&mut self, tree: ViewTree) {
        self.tree = tree;
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn set_viewport(&mut self, viewport: u16) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> u16 {
        self.viewport
    }

    pub fn max_scroll(&self) -> u16 {
        self.tree.max_scroll(self.viewport)
    }

    pub fn scroll(&self) -> u16 {
        self.animator.current_scroll().min(self.max_scroll())
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn needs_update(&self) -> bool {
        self.animator.needs_update()
    }

    pub fn is_pinned(&self) -> bool {
        self.tree.is_pinned(self.scroll())
    }

    /// Placements for the current scroll position
    pub fn layout(&self) -> Vec<Placement> {
        self.tree.layout(self.scroll(), self.viewport)
    }

    /// Rows moved by one line step
    pub fn line_step(&self) -> u16 {
        self.animator.config().scroll_lines.max(1)
    }

    /// One line step down
    pub fn line_down(&mut self) {
        self.scroll_down(self.line_step());
    }

    /// One line step up. At the top a step pulls by a single row, so the
    /// pull threshold does not depend on the step size.
    pub fn line_up(&mut self) -> bool {
        if self.is_resting_at_top() {
            return self.scroll_up(1);
        }
        self.scroll_up(self.line_step())
    }

    fn is_resting_at_top(&self) -> bool {
        self.animator.is_at_top() && self.animator.current_scroll() == 0
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.pull = 0;
        let max = self.max_scroll();
        self.animator.scroll_by(rows as i32, max);
    }

    /// Scroll up, or pull when already resting at the top.
    /// Returns true when the pull crossed the threshold.
    pub fn scroll_up(&mut self, rows: u16) -> bool {
        if self.is_resting_at_top() {
            if self.refresh.in_progress() {
                return false;
            }
            self.pull = self.pull.saturating_add(rows);
            debug!(pull = self.pull, threshold = self.pull_threshold, "Pulling at top");
            if self.pull >= self.pull_threshold {
                self.pull = 0;
                return true;
            }
            return false;
        }
        let max = self.max_scroll();
        self.animator.scroll_by(-(rows as i32), max);
        false
    }

    /// Pull distance as a fraction of the trigger threshold
    pub fn pull_progress(&self) -> f64 {
        (self.pull as f64 / self.pull_threshold as f64).min(1.0)
    }

    pub fn half_page_down(&mut self) {
        self.pull = 0;
        let max = self.max_scroll();
        self.animator.scroll_half_page_down(self.viewport, max);
    }

    pub fn half_page_up(&mut self) {
        let max = self.max_scroll();
        self.animator.scroll_half_page_up(self.viewport, max);
    }

    pub fn page_down(&mut self) {
        self.pull = 0;
        let max = self.max_scroll();
        self.animator.scroll_full_page_down(self.viewport, max);
    }

    pub fn page_up(&mut self) {
        let max = self.max_scroll();
        self.animator.scroll_full_page_up(self.viewport, max);
    }

    pub fn scroll_to_top_at(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.animator.scroll_to_at(0, max, now);
    }

    pub fn scroll_to_bottom_at(&mut self, now: Instant) {
        self.pull = 0;
        let max = self.max_scroll();
        self.animator.scroll_to_at(max, max, now);
    }

    /// Advance the scroll animation, returning the current position
    pub fn update_at(&mut self, now: Instant) -> u16 {
        let max = self.max_scroll();
        self.animator.update_at(max, now)
    }

    pub fn update(&mut self) -> u16 {
        self.update_at(Instant::now())
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.in_progress()
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    pub fn on_refresh_complete(&mut self, callback: RefreshCallback) {
        self.refresh.set_on_complete(callback);
    }

    /// Start a refresh. Returns `None` if one is already in flight.
    pub fn trigger_refresh(&mut self, refresher: &Arc<dyn Refresher>) -> Option<RefreshFuture> {
        if !self.refresh.try_begin() {
            debug!("Refresh already in progress, ignoring trigger");
            return None;
        }
        info!("Refresh started");
        self.pull = 0;
        let refresher = Arc::clone(refresher);
        Some(Box::pin(async move { refresher.refresh().await }))
    }

    /// Record the outcome of the future returned by `trigger_refresh`
    pub fn complete_refresh(&mut self, outcome: Result<()>) {
        let success = match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!("Refresh failed: {}", e);
                false
            }
        };
        if self.refresh.finish(success) {
            info!(success, completed = self.refresh.completed(), "Refresh finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scroll::refresh::FixedDelayRefresher;
    use crate::scroll::sticky::SectionKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn instant_scroll() -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        }
    }

    fn scroller_tree() -> ViewTree {
        ViewTree::new()
            .with_section(SectionKind::Header, 10)
            .with_section(SectionKind::Highlights, 4)
            .with_sticky(SectionKind::TabBar, 2)
            .with_section(SectionKind::Content, 50)
    }

    fn scroller() -> StickyRefreshScroller {
        let mut scroller = StickyRefreshScroller::new(instant_scroll(), &RefreshConfig::default());
        scroller.set_tree(scroller_tree());
        scroller.set_viewport(20);
        scroller
    }

    struct FailingRefresher;

    #[async_trait]
    impl Refresher for FailingRefresher {
        async fn refresh(&self) -> Result<()> {
            Err(Error::Refresh("backend unavailable".into()))
        }
    }

    #[test]
    fn test_scroll_pins_tab_bar() {
        let mut scroller = scroller();
        assert!(!scroller.is_pinned());
        scroller.scroll_down(20);
        assert_eq!(scroller.scroll(), 20);
        assert!(scroller.is_pinned());
        assert!(scroller.layout().last().unwrap().pinned);
    }

    #[test]
    fn test_pull_at_top_triggers_after_threshold() {
        let mut scroller = scroller();
        let threshold = RefreshConfig::default().pull_threshold;
        for _ in 1..threshold {
            assert!(!scroller.scroll_up(1));
        }
        assert!(scroller.scroll_up(1));
        assert_eq!(scroller.pull_progress(), 0.0);
    }

    #[test]
    fn test_scroll_up_away_from_top_does_not_pull() {
        let mut scroller = scroller();
        scroller.scroll_down(10);
        assert!(!scroller.scroll_up(10));
        assert_eq!(scroller.scroll(), 0);
        assert_eq!(scroller.pull_progress(), 0.0);
    }

    #[test]
    fn test_scroll_down_resets_pull() {
        let mut scroller = scroller();
        scroller.scroll_up(1);
        assert!(scroller.pull_progress() > 0.0);
        scroller.scroll_down(1);
        assert_eq!(scroller.pull_progress(), 0.0);
    }

    #[test]
    fn test_line_step_applies_to_lines_only() {
        let mut scroller = StickyRefreshScroller::new(
            ScrollConfig {
                scroll_lines: 3,
                ..instant_scroll()
            },
            &RefreshConfig::default(),
        );
        scroller.set_tree(scroller_tree());
        scroller.set_viewport(20);

        scroller.line_down();
        assert_eq!(scroller.scroll(), 3);
        scroller.page_down();
        assert_eq!(scroller.scroll(), 23);
        scroller.half_page_up();
        assert_eq!(scroller.scroll(), 13);
        assert!(!scroller.line_up());
        assert_eq!(scroller.scroll(), 10);
    }

    #[test]
    fn test_line_up_pulls_one_row_at_a_time() {
        let mut scroller = StickyRefreshScroller::new(
            ScrollConfig {
                scroll_lines: 5,
                ..instant_scroll()
            },
            &RefreshConfig::default(),
        );
        scroller.set_tree(scroller_tree());
        scroller.set_viewport(20);
        let threshold = RefreshConfig::default().pull_threshold;
        for _ in 1..threshold {
            assert!(!scroller.line_up());
        }
        assert!(scroller.line_up());
    }

    #[test]
    fn test_bottom_and_top() {
        let mut scroller = scroller();
        let now = Instant::now();
        scroller.scroll_to_bottom_at(now);
        assert_eq!(scroller.scroll(), 46);
        scroller.scroll_to_top_at(now);
        assert_eq!(scroller.scroll(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_trigger_is_noop() {
        let mut scroller = scroller();
        let transitions = Arc::new(AtomicUsize::new(0));
        let counter = transitions.clone();
        scroller.on_refresh_complete(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let refresher: Arc<dyn Refresher> =
            Arc::new(FixedDelayRefresher::new(Duration::from_millis(2000)));

        let first = scroller.trigger_refresh(&refresher).expect("first trigger starts");
        assert!(scroller.is_refreshing());
        let handle = tokio::spawn(first);

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(scroller.trigger_refresh(&refresher).is_none());
        assert!(scroller.is_refreshing());

        let outcome = handle.await.unwrap();
        scroller.complete_refresh(outcome);

        assert!(!scroller.is_refreshing());
        assert_eq!(transitions.load(Ordering::SeqCst), 1);
        assert_eq!(scroller.refresh_state().completed(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_flag() {
        let mut scroller = scroller();
        let refresher: Arc<dyn Refresher> = Arc::new(FailingRefresher);
        let future = scroller.trigger_refresh(&refresher).unwrap();
        scroller.complete_refresh(future.await);
        assert!(!scroller.is_refreshing());
        assert_eq!(scroller.refresh_state().failed(), 1);
        assert!(scroller.trigger_refresh(&refresher).is_some());
    }

    #[test]
    fn test_pull_ignored_while_refreshing() {
        let mut scroller = scroller();
        let refresher: Arc<dyn Refresher> =
            Arc::new(FixedDelayRefresher::new(Duration::from_millis(10)));
        let _future = scroller.trigger_refresh(&refresher);
        for _ in 0..10 {
            assert!(!scroller.scroll_up(1));
        }
    }
}
