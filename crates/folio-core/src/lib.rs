pub mod config;
pub mod content;
pub mod error;
pub mod motion;
pub mod nav;
pub mod scroll;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use nav::{NavEvent, TabDescriptor, TabSync};
pub use scroll::StickyRefreshScroller;
