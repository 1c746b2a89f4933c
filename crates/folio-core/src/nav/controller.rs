use std::time::Instant;

use tracing::debug;

use super::indicator::{IndicatorAnimator, IndicatorGeometry};
use super::tab::{NavEvent, NavigationState, TabDescriptor};
use crate::config::IndicatorConfig;
use crate::{Error, Result};

/// What a reconciled index change asks of the rest of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub previous: usize,
    pub index: usize,
    /// Whether `active_index` actually moved
    pub changed: bool,
    /// Whether an indicator animation was started (or queued until the
    /// track is measured)
    pub animated: bool,
    /// Page the pager has to move to, `None` when the request came from
    /// the pager itself
    pub scroll_pager: Option<usize>,
}

/// Sole owner and writer of the active tab index.
///
/// Taps and swipe settles are funnelled through [`TabBarController::reconcile`],
/// which applies one request completely before returning.
#[derive(Debug, Clone)]
pub struct TabBarController {
    tabs: Vec<TabDescriptor>,
    state: NavigationState,
    geometry: Option<IndicatorGeometry>,
    indicator: IndicatorAnimator,
    /// Index the indicator was last placed or aimed at
    indicator_index: usize,
    /// An index change arrived before the track was measured
    deferred: bool,
}

impl TabBarController {
    pub fn new(tabs: Vec<TabDescriptor>, config: IndicatorConfig) -> Result<Self> {
        if tabs.is_empty() {
            return Err(Error::Config("tab bar needs at least one tab".to_string()));
        }
        Ok(Self {
            tabs,
            state: NavigationState::default(),
            geometry: None,
            indicator: IndicatorAnimator::new(config),
            indicator_index: 0,
            deferred: false,
        })
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn active_tab(&self) -> &TabDescriptor {
        &self.tabs[self.state.active_index]
    }

    /// Tab highlight is derived from the active index only
    pub fn is_active(&self, index: usize) -> bool {
        self.state.active_index == index
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn geometry(&self) -> Option<&IndicatorGeometry> {
        self.geometry.as_ref()
    }

    pub fn indicator(&self) -> &IndicatorAnimator {
        &self.indicator
    }

    /// True while an indicator animation is waiting for a measurement
    pub fn has_deferred_animation(&self) -> bool {
        self.deferred
    }

    pub fn request_index_change(&mut self, index: usize) -> Result<Reconciliation> {
        self.request_index_change_at(index, Instant::now())
    }

    pub fn request_index_change_at(&mut self, index: usize, now: Instant) -> Result<Reconciliation> {
        self.reconcile_at(NavEvent::TapSelect(index), now)
    }

    pub fn on_paged_host_index_report(&mut self, index: usize) -> Result<Reconciliation> {
        self.on_paged_host_index_report_at(index, Instant::now())
    }

    pub fn on_paged_host_index_report_at(&mut self, index: usize, now: Instant) -> Result<Reconciliation> {
        self.reconcile_at(NavEvent::SwipeSettle(index), now)
    }

    pub fn reconcile(&mut self, event: NavEvent) -> Result<Reconciliation> {
        self.reconcile_at(event, Instant::now())
    }

    /// Apply one index-change request.
    ///
    /// Out-of-range requests are rejected before anything is touched. A
    /// valid request updates the index, then the indicator, then reports
    /// whether the pager has to follow.
    pub fn reconcile_at(&mut self, event: NavEvent, now: Instant) -> Result<Reconciliation> {
        let index = event.index();
        if index >= self.tabs.len() {
            debug!(?event, len = self.tabs.len(), "rejecting tab index");
            return Err(Error::InvalidIndex {
                index,
                len: self.tabs.len(),
            });
        }

        let previous = self.state.active_index;
        let changed = previous != index;
        self.state.active_index = index;

        let animated = changed && self.animate_indicator(now);

        let scroll_pager = match event {
            NavEvent::TapSelect(i) => Some(i),
            NavEvent::SwipeSettle(_) => None,
        };

        if changed {
            debug!(?event, previous, index, "active tab changed");
        }

        Ok(Reconciliation {
            previous,
            index,
            changed,
            animated,
            scroll_pager,
        })
    }

    /// Supply the tab track width.
    ///
    /// The first valid measurement places the indicator and replays a
    /// deferred animation. Later measurements (resizes) re-derive the
    /// resting offset and snap to it. Invalid widths are ignored.
    pub fn measure_at(&mut self, track_width: f64, now: Instant) {
        let Some(geometry) = IndicatorGeometry::measure(
            track_width,
            self.tabs.len(),
            self.indicator.config().width_ratio,
        ) else {
            debug!(track_width, "ignoring unusable tab track measurement");
            return;
        };

        if self.geometry == Some(geometry) && self.indicator.is_placed() {
            return;
        }
        self.geometry = Some(geometry);

        if !self.indicator.is_placed() {
            self.indicator.jump_to(geometry.offset(self.indicator_index));
        }

        if self.deferred {
            self.deferred = false;
            self.indicator_index = self.state.active_index;
            self.indicator
                .animate_to_at(geometry.offset(self.state.active_index), now);
        } else {
            self.indicator_index = self.state.active_index;
            self.indicator.jump_to(geometry.offset(self.state.active_index));
        }
    }

    pub fn measure(&mut self, track_width: f64) {
        self.measure_at(track_width, Instant::now())
    }

    /// Advance the indicator animation and return its rendered offset
    pub fn update_indicator_at(&mut self, now: Instant) -> Option<f64> {
        self.indicator.update_at(now)
    }

    pub fn needs_update(&self) -> bool {
        self.indicator.is_animating()
    }

    fn animate_indicator(&mut self, now: Instant) -> bool {
        match self.geometry {
            Some(geometry) => {
                self.indicator_index = self.state.active_index;
                self.indicator
                    .animate_to_at(geometry.offset(self.state.active_index), now)
            }
            None => {
                // Replayed by `measure_at`
                self.deferred = true;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::EasingType;

    fn tabs(n: usize) -> Vec<TabDescriptor> {
        (0..n)
            .map(|i| TabDescriptor::new(format!("tab{i}"), format!("Tab {i}"), "icon"))
            .collect()
    }

    fn config() -> IndicatorConfig {
        IndicatorConfig {
            smooth_enabled: true,
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            width_ratio: 0.5,
        }
    }

    fn measured(n: usize, now: Instant) -> TabBarController {
        let mut controller = TabBarController::new(tabs(n), config()).unwrap();
        controller.measure_at(300.0, now);
        controller
    }

    #[test]
    fn test_requires_tabs() {
        assert!(TabBarController::new(Vec::new(), config()).is_err());
    }

    #[test]
    fn test_single_tab_is_supported() {
        let now = Instant::now();
        let mut controller = measured(1, now);
        let result = controller.request_index_change_at(0, now).unwrap();
        assert!(!result.changed);
        assert!(controller.request_index_change_at(1, now).is_err());
    }

    #[test]
    fn test_tap_updates_index_indicator_and_pager() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        let result = controller.request_index_change_at(2, now).unwrap();

        assert_eq!(controller.active_index(), 2);
        assert!(result.changed);
        assert!(result.animated);
        assert_eq!(result.scroll_pager, Some(2));

        let target = controller.geometry().unwrap().offset(2);
        assert_eq!(controller.indicator().target_offset(), Some(target));
        assert_eq!(
            controller.update_indicator_at(now + Duration::from_millis(100)),
            Some(target)
        );
    }

    #[test]
    fn test_swipe_report_does_not_move_pager() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        let result = controller.on_paged_host_index_report_at(1, now).unwrap();
        assert_eq!(controller.active_index(), 1);
        assert!(result.animated);
        assert_eq!(result.scroll_pager, None);
    }

    #[test]
    fn test_out_of_range_rejected_without_side_effects() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        controller.request_index_change_at(1, now).unwrap();
        let generation = controller.indicator().generation();

        for bad in [3, 4, usize::MAX] {
            let err = controller.request_index_change_at(bad, now).unwrap_err();
            assert!(matches!(err, Error::InvalidIndex { index, len: 3 } if index == bad));
            assert!(controller.on_paged_host_index_report_at(bad, now).is_err());
        }
        assert_eq!(controller.active_index(), 1);
        assert_eq!(controller.indicator().generation(), generation);
    }

    #[test]
    fn test_repeated_request_is_noop_for_indicator() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        let first = controller.request_index_change_at(2, now).unwrap();
        let second = controller
            .request_index_change_at(2, now + Duration::from_millis(10))
            .unwrap();

        assert!(first.animated);
        assert!(!second.changed);
        assert!(!second.animated);
        assert_eq!(controller.active_index(), 2);
        assert_eq!(controller.indicator().generation(), 1);
    }

    #[test]
    fn test_one_animation_per_change() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        let sequence = [1, 1, 2, 0, 0, 2];
        let mut changes = 0;
        for (step, index) in sequence.into_iter().enumerate() {
            let at = now + Duration::from_millis(step as u64 * 30);
            if controller.request_index_change_at(index, at).unwrap().changed {
                changes += 1;
            }
        }
        assert_eq!(controller.indicator().generation(), changes);
    }

    #[test]
    fn test_last_request_wins() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        controller.request_index_change_at(2, now).unwrap();
        controller
            .on_paged_host_index_report_at(1, now + Duration::from_millis(20))
            .unwrap();
        assert_eq!(controller.active_index(), 1);
        let target = controller.geometry().unwrap().offset(1);
        assert_eq!(controller.indicator().target_offset(), Some(target));
    }

    #[test]
    fn test_unmeasured_defers_animation() {
        let now = Instant::now();
        let mut controller = TabBarController::new(tabs(3), config()).unwrap();
        let result = controller.request_index_change_at(2, now).unwrap();
        assert!(result.animated);
        assert!(controller.has_deferred_animation());
        assert_eq!(controller.indicator().current_offset(), None);

        // Unusable measurement keeps it deferred
        controller.measure_at(0.0, now);
        assert!(controller.has_deferred_animation());

        controller.measure_at(300.0, now);
        assert!(!controller.has_deferred_animation());
        let geometry = *controller.geometry().unwrap();
        // Starts from the resting tab and animates once to the requested one
        assert_eq!(controller.indicator().current_offset(), Some(geometry.offset(0)));
        assert_eq!(controller.indicator().target_offset(), Some(geometry.offset(2)));
        assert_eq!(controller.indicator().generation(), 1);
    }

    #[test]
    fn test_resize_snaps_without_animation() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        controller.request_index_change_at(1, now).unwrap();
        controller.measure_at(600.0, now + Duration::from_millis(10));

        let geometry = *controller.geometry().unwrap();
        assert_eq!(controller.indicator().current_offset(), Some(geometry.offset(1)));
        assert!(!controller.needs_update());
        assert_eq!(controller.indicator().generation(), 1);
    }

    #[test]
    fn test_highlight_follows_index() {
        let now = Instant::now();
        let mut controller = measured(3, now);
        controller.request_index_change_at(1, now).unwrap();
        let active: Vec<bool> = (0..3).map(|i| controller.is_active(i)).collect();
        assert_eq!(active, [false, true, false]);
        assert_eq!(controller.active_tab().key, "tab1");
    }
}
