#![forbid(unsafe_code)]

//! Wall-clock to frame-delta conversion.
//!
//! Animations tick on [`Duration`] deltas. Hosts that receive a timestamp per
//! display frame feed it to [`FrameClock::delta`] and forward the result.
//!
//! # Invariants
//!
//! 1. The first observed instant yields a zero delta.
//! 2. Deltas never exceed `max_frame`, so a stalled event loop resumes the
//!    animation where it left off instead of jumping to the end.
//! 3. An instant earlier than the previous one yields a zero delta.

use std::time::Duration;

use web_time::Instant;

/// Longest delta reported for a single frame by default (100ms).
pub const DEFAULT_MAX_FRAME: Duration = Duration::from_millis(100);

/// Converts successive frame timestamps into bounded deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_frame: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock with the default frame cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }

    /// Set the per-frame cap (builder pattern).
    #[must_use]
    pub fn with_max_frame(mut self, max_frame: Duration) -> Self {
        self.max_frame = max_frame;
        self
    }

    /// Delta since the previous call, capped at `max_frame`.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        dt.min(self.max_frame)
    }

    /// Forget the previous instant; the next `delta` returns zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
