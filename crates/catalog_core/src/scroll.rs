use std::time::{Duration, Instant};

/// Remaining distance to the bottom that counts as "near the end".
pub const SCROLL_THRESHOLD: f64 = 300.0;
/// Minimum spacing between two fired triggers.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Viewport geometry reported by the host on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_top: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    pub fn near_bottom(&self) -> bool {
        self.viewport_height + self.scroll_top >= self.content_height - SCROLL_THRESHOLD
    }
}

/// Coalesces scroll events into at most one trigger per throttle window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTrigger {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(SCROLL_THROTTLE)
    }
}

impl ScrollTrigger {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Returns true when this event should request the next page.
    pub fn observe(&mut self, metrics: ScrollMetrics, at: Instant) -> bool {
        if !metrics.near_bottom() {
            return false;
        }
        if let Some(last) = self.last_fired {
            if at.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_fired = Some(at);
        true
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}
