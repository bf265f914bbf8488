//! Time-driven page effects
//!
//! Pure models: callers pass the current `Instant` and scroll offset in, so
//! none of these read the clock themselves.

mod indicator;
pub mod parallax;
mod reveal;
mod smooth_scroll;

pub use indicator::ScrollIndicator;
pub use reveal::RevealTracker;
pub use smooth_scroll::{resolve_anchor, SmoothScroll};
