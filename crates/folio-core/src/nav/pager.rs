//! Swipeable content panes
//!
//! Position is kept in page units so the pager works before it has been
//! measured. The gesture lifecycle is `Idle -> Dragging -> Settling -> Idle`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::PagerConfig;
use crate::motion::Tween;
use crate::{Error, Result};

/// Who started the current settle animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleSource {
    /// Release of a user drag; reports the landing page if it changed
    Gesture { origin: usize },
    /// `scroll_to_index`; never reported
    Programmatic,
}

#[derive(Debug, Clone, Copy)]
pub enum PagerPhase {
    Idle,
    Dragging {
        /// Committed page when the drag started
        origin: usize,
        /// Page nearest to where the content was grabbed
        anchor: usize,
        /// Position (pages) when the drag started
        base: f64,
        /// Accumulated horizontal movement in columns, positive to the right
        delta: f64,
    },
    Settling {
        target: usize,
        tween: Tween,
        source: SettleSource,
    },
}

#[derive(Debug, Clone)]
pub struct PagedContentHost {
    config: PagerConfig,
    page_count: usize,
    /// Committed page
    index: usize,
    /// Rendered position in pages
    position: f64,
    /// Width of one page in columns, 0 until measured
    page_width: f64,
    phase: PagerPhase,
    mounted: Vec<bool>,
}

impl PagedContentHost {
    pub fn new(page_count: usize, config: PagerConfig) -> Result<Self> {
        if page_count == 0 {
            return Err(Error::Config("pager needs at least one page".to_string()));
        }
        let mut host = Self {
            config,
            page_count,
            index: 0,
            position: 0.0,
            page_width: 0.0,
            phase: PagerPhase::Idle,
            mounted: vec![false; page_count],
        };
        host.mount_around(0);
        Ok(host)
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Committed page: the page the pager rests on, or is programmatically
    /// heading to
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Rendered position in pages (fractional while moving)
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, PagerPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PagerPhase::Dragging { .. })
    }

    pub fn needs_update(&self) -> bool {
        matches!(self.phase, PagerPhase::Settling { .. })
    }

    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted.get(index).copied().unwrap_or(false)
    }

    /// Indices of mounted panes in order
    pub fn mounted_panes(&self) -> impl Iterator<Item = usize> + '_ {
        self.mounted
            .iter()
            .enumerate()
            .filter_map(|(i, mounted)| mounted.then_some(i))
    }

    /// Pages intersecting the viewport at the current position, with the
    /// fraction of the viewport each one covers
    pub fn visible_pages(&self) -> Vec<(usize, f64)> {
        let left = self.position.floor();
        let frac = self.position - left;
        let left = left as usize;
        if frac < 1e-6 || left + 1 >= self.page_count {
            vec![(left.min(self.page_count - 1), 1.0)]
        } else {
            vec![(left, 1.0 - frac), (left + 1, frac)]
        }
    }

    pub fn set_page_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.page_width = width;
        }
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Programmatic move, used when the tab bar initiated the change.
    ///
    /// Cancels any drag or settle in progress and commits at once. Never
    /// produces a settle report.
    pub fn scroll_to_index_at(&mut self, index: usize, now: Instant) -> Result<()> {
        if index >= self.page_count {
            return Err(Error::InvalidIndex {
                index,
                len: self.page_count,
            });
        }
        if self.is_idle() && self.index == index && self.position == index as f64 {
            return Ok(());
        }
        debug!(index, "pager scrolling to page");
        self.index = index;
        self.mount_around(index);
        self.start_settle(index, SettleSource::Programmatic, now);
        Ok(())
    }

    pub fn scroll_to_index(&mut self, index: usize) -> Result<()> {
        self.scroll_to_index_at(index, Instant::now())
    }

    /// Grab the content. Interrupts a settle animation where it is.
    pub fn begin_drag_at(&mut self, now: Instant) {
        match self.phase {
            PagerPhase::Dragging { .. } => return,
            PagerPhase::Settling { tween, .. } => self.position = tween.value_at(now),
            PagerPhase::Idle => {}
        }
        let anchor = (self.position.round() as usize).min(self.page_count - 1);
        self.mount_around(anchor);
        self.phase = PagerPhase::Dragging {
            origin: self.index,
            anchor,
            base: self.position,
            delta: 0.0,
        };
    }

    pub fn begin_drag(&mut self) {
        self.begin_drag_at(Instant::now())
    }

    /// Move the content by `dx` columns; positive drags reveal the previous page
    pub fn drag_by(&mut self, dx: f64) {
        if self.page_width <= 0.0 || !dx.is_finite() {
            return;
        }
        let max = (self.page_count - 1) as f64;
        if let PagerPhase::Dragging { base, delta, .. } = &mut self.phase {
            *delta += dx;
            self.position = (*base - *delta / self.page_width).clamp(0.0, max);
        }
    }

    /// Let go of the content.
    ///
    /// Past the commit threshold the pager settles on the neighbouring
    /// page, otherwise it returns to where the drag started.
    pub fn release_at(&mut self, now: Instant) {
        let PagerPhase::Dragging { origin, anchor, .. } = self.phase else {
            return;
        };
        let displacement = self.position - anchor as f64;
        let threshold = self.config.commit_threshold;
        let target = if displacement >= threshold {
            (anchor + 1).min(self.page_count - 1)
        } else if displacement <= -threshold {
            anchor.saturating_sub(1)
        } else {
            anchor
        };
        debug!(origin, target, displacement, "pager released");
        self.mount_around(target);
        self.start_settle(target, SettleSource::Gesture { origin }, now);
    }

    pub fn release(&mut self) {
        self.release_at(Instant::now())
    }

    /// Advance the settle animation.
    ///
    /// Returns `Some(index)` once, when a gesture finishes settling on a
    /// page other than the one it started from.
    pub fn tick_at(&mut self, now: Instant) -> Option<usize> {
        let PagerPhase::Settling { target, tween, source } = self.phase else {
            return None;
        };
        self.position = tween.value_at(now);
        if !tween.is_complete_at(now) {
            let passing = (self.position.floor() as usize).min(self.page_count - 1);
            self.mount_around(passing);
            return None;
        }

        self.position = target as f64;
        self.index = target;
        self.phase = PagerPhase::Idle;
        match source {
            SettleSource::Gesture { origin } if origin != target => {
                debug!(origin, target, "pager settled on new page");
                Some(target)
            }
            _ => None,
        }
    }

    pub fn tick(&mut self) -> Option<usize> {
        self.tick_at(Instant::now())
    }

    fn start_settle(&mut self, target: usize, source: SettleSource, now: Instant) {
        let to = target as f64;
        if (self.position - to).abs() < 1e-9 || self.config.settle_duration_ms == 0 {
            // Already there: settle on the next tick without moving
            self.position = to;
        }
        self.phase = PagerPhase::Settling {
            target,
            tween: Tween::new(
                now,
                self.position,
                to,
                Duration::from_millis(self.config.settle_duration_ms),
                self.config.easing,
            ),
            source,
        };
    }

    fn mount_around(&mut self, index: usize) {
        let start = index.saturating_sub(1);
        let end = (index + 1).min(self.page_count - 1);
        for slot in &mut self.mounted[start..=end] {
            *slot = true;
        }
    }
}
