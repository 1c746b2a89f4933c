use serde::{Deserialize, Serialize};

/// Static description of one tab. Defined at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub key: String,
    pub title: String,
    pub icon_ref: String,
}

impl TabDescriptor {
    pub fn new(key: impl Into<String>, title: impl Into<String>, icon_ref: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            icon_ref: icon_ref.into(),
        }
    }
}

/// Which category is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub active_index: usize,
}

/// An index-change request, tagged with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// User picked a tab. The pager must be moved to follow.
    TapSelect(usize),
    /// The pager finished settling on an index after a swipe. It is already there.
    SwipeSettle(usize),
}

impl NavEvent {
    pub fn index(&self) -> usize {
        match *self {
            NavEvent::TapSelect(index) | NavEvent::SwipeSettle(index) => index,
        }
    }
}
