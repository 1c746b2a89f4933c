pub mod animation;
pub mod refresh;
pub mod scroller;
pub mod sticky;

pub use animation::ScrollAnimator;
pub use refresh::{FixedDelayRefresher, RefreshCallback, RefreshState, Refresher};
pub use scroller::{RefreshFuture, StickyRefreshScroller};
pub use sticky::{Placement, Section, SectionKind, ViewTree};
