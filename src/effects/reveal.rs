//! Scroll-triggered reveal of page sections
//!
//! Mirrors how an intersection observer reports: each update produces a
//! batch of entries (elements whose intersecting state changed, or every
//! observed element on the first report). Entries that are intersecting get
//! a staggered reveal and stop being observed.

use std::time::{Duration, Instant};

/// How long a single reveal animation runs once it starts
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f32,
    stagger: Duration,
    observed: Vec<bool>,
    intersecting: Vec<Option<bool>>,
    reveal_at: Vec<Option<Instant>>,
}

impl RevealTracker {
    pub fn new(count: usize, threshold: f32, stagger: Duration) -> Self {
        Self {
            threshold,
            stagger,
            observed: vec![true; count],
            intersecting: vec![None; count],
            reveal_at: vec![None; count],
        }
    }

    #[cfg(test)]
    pub fn is_observed(&self, index: usize) -> bool {
        self.observed.get(index).copied().unwrap_or(false)
    }

    /// Report the visible ratio of every element. Returns how many reveals
    /// were scheduled by this update.
    pub fn update(&mut self, ratios: &[f32], now: Instant) -> usize {
        let mut entry_index: u32 = 0;
        let mut scheduled = 0;

        for (i, ratio) in ratios.iter().enumerate().take(self.observed.len()) {
            if !self.observed[i] {
                continue;
            }
            let is_intersecting = *ratio >= self.threshold && *ratio > 0.0;
            if self.intersecting[i] == Some(is_intersecting) {
                continue;
            }
            self.intersecting[i] = Some(is_intersecting);

            if is_intersecting {
                let delay = self.stagger * entry_index;
                self.reveal_at[i] = Some(now + delay);
                self.observed[i] = false;
                scheduled += 1;
                tracing::debug!("Reveal of section {i} scheduled in {delay:?}");
            }
            entry_index += 1;
        }

        scheduled
    }

    /// Eased reveal progress in `0.0..=1.0`
    pub fn progress(&self, index: usize, now: Instant) -> f32 {
        let Some(Some(at)) = self.reveal_at.get(index) else {
            return 0.0;
        };
        if now < *at {
            return 0.0;
        }
        let elapsed = now.duration_since(*at).as_secs_f32();
        let linear = (elapsed / REVEAL_DURATION.as_secs_f32()).min(1.0);
        simple_easing::cubic_out(linear)
    }

    /// True while any scheduled reveal has not finished
    pub fn is_animating(&self, now: Instant) -> bool {
        self.reveal_at
            .iter()
            .flatten()
            .any(|at| now < *at + REVEAL_DURATION)
    }
}
