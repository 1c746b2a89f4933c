use std::time::Instant;

use tracing::debug;

use super::controller::{Reconciliation, TabBarController};
use super::pager::PagedContentHost;
use super::tab::{NavEvent, TabDescriptor};
use crate::config::{IndicatorConfig, PagerConfig};
use crate::Result;

/// Tab bar, underline and content pager kept in step.
///
/// Taps go controller -> pager; swipes go pager -> controller. The
/// controller never tells the pager to move in response to the pager's own
/// report, so neither direction can bounce back.
#[derive(Debug, Clone)]
pub struct TabSync {
    controller: TabBarController,
    pager: PagedContentHost,
}

impl TabSync {
    pub fn new(tabs: Vec<TabDescriptor>, indicator: IndicatorConfig, pager: PagerConfig) -> Result<Self> {
        let page_count = tabs.len();
        Ok(Self {
            controller: TabBarController::new(tabs, indicator)?,
            pager: PagedContentHost::new(page_count, pager)?,
        })
    }

    pub fn controller(&self) -> &TabBarController {
        &self.controller
    }

    pub fn pager(&self) -> &PagedContentHost {
        &self.pager
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    pub fn tab_count(&self) -> usize {
        self.controller.len()
    }

    /// Supply layout measurements: tab track width and page width
    pub fn measure_at(&mut self, track_width: f64, page_width: f64, now: Instant) {
        self.controller.measure_at(track_width, now);
        self.pager.set_page_width(page_width);
    }

    pub fn tap(&mut self, index: usize) -> Result<Reconciliation> {
        self.tap_at(index, Instant::now())
    }

    /// A tab was selected directly
    pub fn tap_at(&mut self, index: usize, now: Instant) -> Result<Reconciliation> {
        let result = self.controller.reconcile_at(NavEvent::TapSelect(index), now)?;
        if let Some(page) = result.scroll_pager {
            self.pager.scroll_to_index_at(page, now)?;
        }
        Ok(result)
    }

    /// Tap the tab `step` positions away, wrapping around
    pub fn tap_relative_at(&mut self, step: isize, now: Instant) -> Result<Reconciliation> {
        let len = self.tab_count() as isize;
        let index = (self.active_index() as isize + step).rem_euclid(len) as usize;
        self.tap_at(index, now)
    }

    pub fn begin_swipe_at(&mut self, now: Instant) {
        self.pager.begin_drag_at(now);
    }

    pub fn swipe_by(&mut self, dx: f64) {
        self.pager.drag_by(dx);
    }

    pub fn end_swipe_at(&mut self, now: Instant) {
        self.pager.release_at(now);
    }

    /// A complete swipe of one page width, `direction` > 0 for the next page
    pub fn swipe_page_at(&mut self, direction: i8, now: Instant) {
        let width = self.pager.page_width();
        if width <= 0.0 || direction == 0 {
            return;
        }
        self.pager.begin_drag_at(now);
        self.pager.drag_by(-(direction.signum() as f64) * width);
        self.pager.release_at(now);
    }

    /// Advance all animations to `now`.
    ///
    /// A finished swipe is reported to the controller here, which updates
    /// the index and the underline without instructing the pager.
    pub fn tick_at(&mut self, now: Instant) -> Result<Option<Reconciliation>> {
        self.controller.update_indicator_at(now);
        let Some(settled) = self.pager.tick_at(now) else {
            return Ok(None);
        };
        let result = self
            .controller
            .reconcile_at(NavEvent::SwipeSettle(settled), now)?;
        debug_assert!(result.scroll_pager.is_none());
        debug!(index = settled, "swipe settled");
        Ok(Some(result))
    }

    pub fn tick(&mut self) -> Result<Option<Reconciliation>> {
        self.tick_at(Instant::now())
    }

    pub fn needs_update(&self) -> bool {
        self.controller.needs_update() || self.pager.needs_update()
    }

    /// Controller and pager agree once the pager is at rest
    pub fn is_consistent(&self) -> bool {
        !self.pager.is_idle() || self.pager.current_index() == self.controller.active_index()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::EasingType;

    const SETTLE: Duration = Duration::from_millis(200);

    fn sync(n: usize) -> (TabSync, Instant) {
        let indicator = IndicatorConfig {
            smooth_enabled: true,
            animation_duration_ms: 150,
            easing: EasingType::Cubic,
            width_ratio: 0.5,
        };
        let pager = PagerConfig {
            commit_threshold: 0.5,
            settle_duration_ms: 200,
            easing: EasingType::Cubic,
        };
        let tabs = (0..n)
            .map(|i| TabDescriptor::new(format!("k{i}"), format!("T{i}"), ""))
            .collect();
        let mut sync = TabSync::new(tabs, indicator, pager).unwrap();
        let now = Instant::now();
        sync.measure_at(90.0, 90.0, now);
        (sync, now)
    }

    #[test]
    fn test_tap_scenario() {
        let (mut sync, now) = sync(3);
        let result = sync.tap_at(2, now).unwrap();
        assert_eq!(result.scroll_pager, Some(2));
        assert_eq!(sync.active_index(), 2);
        assert_eq!(sync.pager().current_index(), 2);
        assert!(sync.needs_update());

        assert_eq!(sync.tick_at(now + SETTLE).unwrap(), None);
        let geometry = *sync.controller().geometry().unwrap();
        assert_eq!(
            sync.controller().indicator().current_offset(),
            Some(geometry.offset(2))
        );
        assert_eq!(sync.pager().position(), 2.0);
        assert!(!sync.needs_update());
    }

    #[test]
    fn test_swipe_scenario() {
        let (mut sync, now) = sync(3);
        sync.begin_swipe_at(now);
        sync.swipe_by(-60.0);
        sync.end_swipe_at(now);
        // Still dragging/settling: the index has not moved yet
        assert_eq!(sync.active_index(), 0);
        assert_eq!(sync.tick_at(now + Duration::from_millis(50)).unwrap(), None);

        let result = sync.tick_at(now + SETTLE).unwrap().unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.scroll_pager, None);
        assert!(result.animated);
        assert_eq!(sync.active_index(), 1);
        assert!(sync.is_consistent());
    }

    #[test]
    fn test_aborted_swipe_changes_nothing() {
        let (mut sync, now) = sync(3);
        sync.begin_swipe_at(now);
        sync.swipe_by(-20.0);
        sync.end_swipe_at(now);
        assert_eq!(sync.tick_at(now + SETTLE).unwrap(), None);
        assert_eq!(sync.active_index(), 0);
        assert_eq!(sync.controller().indicator().generation(), 0);
    }

    #[test]
    fn test_invalid_tap_leaves_everything() {
        let (mut sync, now) = sync(3);
        assert!(sync.tap_at(3, now).is_err());
        assert_eq!(sync.active_index(), 0);
        assert!(sync.pager().is_idle());
        assert!(!sync.needs_update());
    }

    #[test]
    fn test_tap_relative_wraps() {
        let (mut sync, now) = sync(3);
        sync.tap_relative_at(-1, now).unwrap();
        assert_eq!(sync.active_index(), 2);
        sync.tap_relative_at(1, now).unwrap();
        assert_eq!(sync.active_index(), 0);
    }

    #[test]
    fn test_interleaved_events_never_diverge() {
        let (mut sync, start) = sync(3);
        let mut now = start;
        let step = Duration::from_millis(30);
        // Deterministic mix of taps, swipes and partial frames
        let script: [(u8, i32); 12] = [
            (0, 2), (1, 60), (2, 0), (0, 1), (1, -60), (1, -60),
            (2, 0), (0, 0), (1, 10), (0, 2), (1, 70), (2, 0),
        ];
        for (kind, value) in script {
            match kind {
                0 => {
                    sync.tap_at(value as usize, now).unwrap();
                }
                1 => {
                    sync.begin_swipe_at(now);
                    sync.swipe_by(value as f64);
                    sync.end_swipe_at(now);
                }
                _ => {}
            }
            now += step;
            sync.tick_at(now).unwrap();
        }
        now += Duration::from_secs(1);
        sync.tick_at(now).unwrap();

        assert!(sync.pager().is_idle());
        assert_eq!(sync.pager().current_index(), sync.active_index());
        assert!(sync.is_consistent());
    }

    #[test]
    fn test_swipe_page_uses_gesture_path() {
        let (mut sync, now) = sync(3);
        sync.swipe_page_at(1, now);
        let result = sync.tick_at(now + SETTLE).unwrap().unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.scroll_pager, None);

        // Swiping past the last page settles back without a report
        sync.swipe_page_at(1, now + SETTLE);
        sync.tick_at(now + SETTLE * 2).unwrap();
        sync.swipe_page_at(1, now + SETTLE * 2);
        assert_eq!(sync.tick_at(now + SETTLE * 3).unwrap(), None);
        assert_eq!(sync.active_index(), 2);
    }
}
