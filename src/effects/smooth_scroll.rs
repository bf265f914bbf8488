//! Smooth scrolling to in-page anchors

use std::time::{Duration, Instant};

const SCROLL_DURATION: Duration = Duration::from_millis(400);

/// Find the top line of the section an `#id` link points at.
/// Links that are not fragments, or that name no section, resolve to `None`.
pub fn resolve_anchor<'a, I>(href: &str, targets: I) -> Option<u16>
where
    I: IntoIterator<Item = (&'a str, u16)>,
{
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    targets
        .into_iter()
        .find(|(target_id, _)| *target_id == id)
        .map(|(_, top)| top)
}

/// An in-progress eased scroll between two offsets
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    from: u16,
    to: u16,
    started: Instant,
}

impl SmoothScroll {
    pub fn new(from: u16, to: u16, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> u16 {
        self.to
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.duration_since(self.started) >= SCROLL_DURATION
    }

    /// Scroll offset to show at `now`
    pub fn position(&self, now: Instant) -> u16 {
        let elapsed = now.duration_since(self.started).as_secs_f32();
        let linear = (elapsed / SCROLL_DURATION.as_secs_f32()).min(1.0);
        let eased = simple_easing::cubic_in_out(linear);
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        (from + (to - from) * eased).round() as u16
    }
}
