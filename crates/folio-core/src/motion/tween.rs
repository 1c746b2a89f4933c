use std::time::{Duration, Instant};

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};

/// A single eased interpolation between two values
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    pub fn new(start: Instant, from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            start,
            from,
            to,
            duration,
            easing,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Interpolated value at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.is_complete_at(now) {
            return self.to;
        }
        let t = self.easing.apply(progress(self.start, now, self.duration));
        lerp(self.from, self.to, t)
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        is_complete(self.start, now, self.duration)
    }
}
