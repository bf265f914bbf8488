//! Scroll indicator fade
//!
//! Scroll events are throttled: the first one arms a timer, later ones are
//! ignored until it fires, and the scroll offset is read when it fires.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScrollIndicator {
    throttle: Duration,
    hide_after: u16,
    pending: Option<Instant>,
    visible: bool,
}

impl ScrollIndicator {
    pub fn new(throttle: Duration, hide_after: u16) -> Self {
        Self {
            throttle,
            hide_after,
            pending: None,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_scroll(&mut self, now: Instant) {
        if self.pending.is_none() {
            self.pending = Some(now + self.throttle);
        }
    }

    /// Fire the timer if due. Returns true when visibility was re-evaluated.
    pub fn tick(&mut self, now: Instant, scroll_offset: u16) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.visible = scroll_offset <= self.hide_after;
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
