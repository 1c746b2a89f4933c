//! Refresh collaborator and in-flight bookkeeping

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::RefreshConfig;
use crate::error::Result;

/// Something that can reload the screen's data
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

/// Refresher that just waits a fixed delay and succeeds
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayRefresher {
    delay: Duration,
}

impl FixedDelayRefresher {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Refresher for FixedDelayRefresher {
    async fn refresh(&self) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Called once per finished refresh with whether it succeeded
pub type RefreshCallback = Box<dyn FnMut(bool) + Send>;

/// Tracks whether a refresh is in flight
#[derive(Default)]
pub struct RefreshState {
    in_progress: bool,
    completed: u64,
    failed: u64,
    on_complete: Option<RefreshCallback>,
}

impl fmt::Debug for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshState")
            .field("in_progress", &self.in_progress)
            .field("completed", &self.completed)
            .field("failed", &self.failed)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_complete(&mut self, callback: RefreshCallback) {
        self.on_complete = Some(callback);
    }

    #[inline]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Finished refreshes, failed ones included
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Mark a refresh as started. Returns false if one is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        true
    }

    /// Clear the in-flight flag. Ignored when nothing is running.
    pub fn finish(&mut self, success: bool) -> bool {
        if !self.in_progress {
            return false;
        }
        self.in_progress = false;
        self.completed += 1;
        if !success {
            self.failed += 1;
        }
        if let Some(callback) = self.on_complete.as_mut() {
            callback(success);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_begin_is_exclusive() {
        let mut state = RefreshState::new();
        assert!(state.try_begin());
        assert!(!state.try_begin());
        assert!(state.finish(true));
        assert!(!state.finish(true));
        assert!(state.try_begin());
    }

    #[test]
    fn test_callback_fires_once_per_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut state = RefreshState::new();
        state.set_on_complete(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        state.try_begin();
        state.finish(false);
        state.finish(true);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.completed(), 1);
        assert_eq!(state.failed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_waits() {
        let refresher = FixedDelayRefresher::new(Duration::from_millis(2000));
        let start = tokio::time::Instant::now();
        refresher.refresh().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
