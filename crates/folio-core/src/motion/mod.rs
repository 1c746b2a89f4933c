//! Animation primitives shared by the tab indicator, the content pager and
//! the outer scroll
//!
//! - `easing` - Pure easing functions (cubic, quintic, exponential)
//! - `timing` - Progress and interpolation helpers
//! - `tween` - One eased interpolation between two values

pub mod easing;
pub mod timing;
pub mod tween;

pub use easing::EasingType;
pub use tween::Tween;
