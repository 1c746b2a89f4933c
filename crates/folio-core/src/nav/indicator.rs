//! Tab underline geometry and animation

use std::time::{Duration, Instant};

use crate::config::IndicatorConfig;
use crate::motion::Tween;

const EPSILON: f64 = 1e-6;

/// Left edge of an indicator centered under tab cell `index`.
///
/// Returns `None` while the track is unmeasured (zero, negative or
/// non-finite width) or there are no tabs.
pub fn compute_target_offset(
    index: usize,
    tab_count: usize,
    track_width: f64,
    indicator_width: f64,
) -> Option<f64> {
    if tab_count == 0 || !track_width.is_finite() || track_width <= 0.0 {
        return None;
    }
    if !indicator_width.is_finite() || indicator_width < 0.0 {
        return None;
    }
    let cell = track_width / tab_count as f64;
    Some(index as f64 * cell + (cell - indicator_width) / 2.0)
}

/// Measured tab track. Derived data: rebuilding it from the same
/// measurement always produces the same offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorGeometry {
    track_width: f64,
    indicator_width: f64,
    tab_count: usize,
}

impl IndicatorGeometry {
    /// `width_ratio` is the underline width as a fraction of one tab cell,
    /// clamped to (0, 1] so the underline never leaves its cell.
    pub fn measure(track_width: f64, tab_count: usize, width_ratio: f64) -> Option<Self> {
        if tab_count == 0 || !track_width.is_finite() || track_width <= 0.0 {
            return None;
        }
        let cell = track_width / tab_count as f64;
        let ratio = if width_ratio.is_finite() {
            width_ratio.clamp(EPSILON, 1.0)
        } else {
            1.0
        };
        Some(Self {
            track_width,
            indicator_width: cell * ratio,
            tab_count,
        })
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn indicator_width(&self) -> f64 {
        self.indicator_width
    }

    pub fn tab_count(&self) -> usize {
        self.tab_count
    }

    pub fn cell_width(&self) -> f64 {
        self.track_width / self.tab_count as f64
    }

    pub fn offset(&self, index: usize) -> f64 {
        compute_target_offset(index, self.tab_count, self.track_width, self.indicator_width)
            .unwrap_or(0.0)
    }
}

/// Animates the underline offset on the presentation clock.
///
/// Retargeting always starts from the currently rendered value, so a new
/// target mid-flight never snaps back to the old target or to zero.
#[derive(Debug, Clone)]
pub struct IndicatorAnimator {
    config: IndicatorConfig,
    /// Last rendered offset, `None` until the first placement
    current: Option<f64>,
    tween: Option<Tween>,
    /// Number of animations started so far
    generation: u64,
}

impl IndicatorAnimator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config,
            current: None,
            tween: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.current.is_some()
    }

    /// Last rendered offset
    pub fn current_offset(&self) -> Option<f64> {
        self.current
    }

    /// Where the indicator will come to rest
    pub fn target_offset(&self) -> Option<f64> {
        self.tween.map(|t| t.target()).or(self.current)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Place the indicator without animating, cancelling any animation
    pub fn jump_to(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.tween = None;
        self.current = Some(offset);
    }

    pub fn animate_to(&mut self, target: f64) -> bool {
        self.animate_to_at(target, Instant::now())
    }

    /// Start or retarget an animation towards `target`.
    ///
    /// Returns `true` when a new animation was started. Non-finite targets
    /// are ignored, an unplaced indicator is placed directly, and a target
    /// equal to the current destination is a no-op.
    pub fn animate_to_at(&mut self, target: f64, now: Instant) -> bool {
        if !target.is_finite() {
            return false;
        }
        let Some(from) = self.value_at(now) else {
            self.current = Some(target);
            return false;
        };
        if let Some(dest) = self.target_offset() {
            if (dest - target).abs() < EPSILON {
                return false;
            }
        }

        self.current = Some(from);
        if !self.config.smooth_enabled || self.config.animation_duration_ms == 0 {
            self.tween = None;
            self.current = Some(target);
            self.generation += 1;
            return true;
        }

        self.tween = Some(Tween::new(
            now,
            from,
            target,
            Duration::from_millis(self.config.animation_duration_ms),
            self.config.easing,
        ));
        self.generation += 1;
        true
    }

    pub fn update(&mut self) -> Option<f64> {
        self.update_at(Instant::now())
    }

    /// Advance to `now` and return the rendered offset
    pub fn update_at(&mut self, now: Instant) -> Option<f64> {
        if let Some(tween) = self.tween {
            self.current = Some(tween.value_at(now));
            if tween.is_complete_at(now) {
                self.tween = None;
            }
        }
        self.current
    }

    fn value_at(&self, now: Instant) -> Option<f64> {
        match self.tween {
            Some(tween) => Some(tween.value_at(now)),
            None => self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    fn linear(duration_ms: u64) -> IndicatorConfig {
        IndicatorConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            width_ratio: 0.5,
        }
    }

    #[test]
    fn test_offset_formula() {
        // 300 wide, 3 tabs, 50 wide indicator: cells of 100, centered => 25
        assert_eq!(compute_target_offset(0, 3, 300.0, 50.0), Some(25.0));
        assert_eq!(compute_target_offset(1, 3, 300.0, 50.0), Some(125.0));
        assert_eq!(compute_target_offset(2, 3, 300.0, 50.0), Some(225.0));
    }

    #[test]
    fn test_offset_unmeasured() {
        assert_eq!(compute_target_offset(0, 3, 0.0, 10.0), None);
        assert_eq!(compute_target_offset(0, 3, f64::NAN, 10.0), None);
        assert_eq!(compute_target_offset(0, 0, 300.0, 10.0), None);
        assert!(IndicatorGeometry::measure(0.0, 3, 0.5).is_none());
    }

    #[test]
    fn test_offset_monotonic_and_inside_track() {
        for tabs in 1..=7usize {
            for width in [1.0, 37.0, 80.0, 333.3] {
                for ratio in [0.1, 0.5, 1.0, 4.0] {
                    let geometry = IndicatorGeometry::measure(width, tabs, ratio).unwrap();
                    let mut prev = f64::NEG_INFINITY;
                    for i in 0..tabs {
                        let offset = geometry.offset(i);
                        assert!(offset > prev);
                        assert!(offset >= 0.0);
                        assert!(offset + geometry.indicator_width() <= width + EPSILON);
                        prev = offset;
                    }
                }
            }
        }
    }

    #[test]
    fn test_geometry_is_idempotent() {
        let a = IndicatorGeometry::measure(120.0, 3, 0.5).unwrap();
        let b = IndicatorGeometry::measure(120.0, 3, 0.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.offset(2), b.offset(2));
    }

    #[test]
    fn test_first_target_places_without_animation() {
        let mut animator = IndicatorAnimator::new(linear(100));
        let now = Instant::now();
        assert!(!animator.animate_to_at(10.0, now));
        assert_eq!(animator.current_offset(), Some(10.0));
        assert_eq!(animator.generation(), 0);
    }

    #[test]
    fn test_animation_runs_to_target() {
        let mut animator = IndicatorAnimator::new(linear(100));
        let now = Instant::now();
        animator.jump_to(0.0);
        assert!(animator.animate_to_at(100.0, now));
        let mid = animator.update_at(now + Duration::from_millis(50)).unwrap();
        assert!((mid - 50.0).abs() < 0.001);
        assert_eq!(animator.update_at(now + Duration::from_millis(100)), Some(100.0));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_interpolated_value() {
        let mut animator = IndicatorAnimator::new(linear(100));
        let now = Instant::now();
        animator.jump_to(0.0);
        animator.animate_to_at(100.0, now);

        let retarget_at = now + Duration::from_millis(40);
        assert!(animator.animate_to_at(0.0, retarget_at));
        // Immediately after retargeting it is still where it was drawn
        let value = animator.update_at(retarget_at).unwrap();
        assert!((value - 40.0).abs() < 0.001);

        let half = animator.update_at(retarget_at + Duration::from_millis(50)).unwrap();
        assert!((half - 20.0).abs() < 0.001);
        assert_eq!(animator.generation(), 2);
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut animator = IndicatorAnimator::new(linear(100));
        let now = Instant::now();
        animator.jump_to(0.0);
        assert!(animator.animate_to_at(50.0, now));
        assert!(!animator.animate_to_at(50.0, now + Duration::from_millis(10)));
        assert_eq!(animator.generation(), 1);
    }

    #[test]
    fn test_invalid_target_ignored() {
        let mut animator = IndicatorAnimator::new(linear(100));
        animator.jump_to(5.0);
        assert!(!animator.animate_to_at(f64::NAN, Instant::now()));
        assert!(!animator.animate_to_at(f64::INFINITY, Instant::now()));
        assert_eq!(animator.current_offset(), Some(5.0));
    }

    #[test]
    fn test_disabled_smoothing_jumps() {
        let mut config = linear(100);
        config.smooth_enabled = false;
        let mut animator = IndicatorAnimator::new(config);
        animator.jump_to(0.0);
        assert!(animator.animate_to_at(70.0, Instant::now()));
        assert!(!animator.is_animating());
        assert_eq!(animator.current_offset(), Some(70.0));
    }
}
