//! Trailing-edge debouncer for viewport resizes.
//!
//! Each raw resize restarts the quiet period. Only the last viewport of a
//! burst is handed out, once the period has passed without another event.
//! Time is passed in explicitly so the host's frame clock drives it.

use crate::constants::RESIZE_DEBOUNCE_MS;
use crate::types::Size;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(Size, Instant)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(RESIZE_DEBOUNCE_MS))
    }
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record a raw resize event.
    pub fn push(&mut self, viewport: Size, now: Instant) {
        trace!(width = viewport.width, height = viewport.height, "resize queued");
        self.pending = Some((viewport, now));
    }

    /// Hand out the settled viewport once the quiet period is over.
    pub fn tick(&mut self, now: Instant) -> Option<Size> {
        let (viewport, last) = self.pending?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.pending = None;
        Some(viewport)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop a queued resize without applying it.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
