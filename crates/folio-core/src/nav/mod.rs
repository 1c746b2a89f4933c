//! Tab navigation: the active index, its animated underline and the
//! swipeable content pager
//!
//! - `tab` - Descriptors, navigation state and the tagged index-change event
//! - `indicator` - Underline geometry and animation
//! - `controller` - Single writer of the active index
//! - `pager` - Gesture-driven paged content
//! - `sync` - Wires the controller and the pager together

pub mod controller;
pub mod indicator;
pub mod pager;
pub mod sync;
pub mod tab;

pub use controller::{Reconciliation, TabBarController};
pub use indicator::{compute_target_offset, IndicatorAnimator, IndicatorGeometry};
pub use pager::{PagedContentHost, PagerPhase, SettleSource};
pub use sync::TabSync;
pub use tab::{NavEvent, NavigationState, TabDescriptor};
