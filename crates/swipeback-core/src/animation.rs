#![forbid(unsafe_code)]

//! Composable animation primitives.
//!
//! Time-based animations that produce normalized `f64` values (0.0–1.0).
//! A transition maps that value onto screen frames; the animations themselves
//! know nothing about screens.
//!
//! # Driving
//!
//! Animations are advanced by the caller with [`Animation::tick`]. Hosts that
//! only have wall-clock timestamps can use [`FrameClock`] to turn instants
//! into bounded per-frame deltas.

pub mod clock;
pub mod spring;

use std::time::Duration;

pub use clock::FrameClock;
pub use spring::Spring;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);

    /// Time elapsed past completion.
    /// Returns [`Duration::ZERO`] for animations that never complete.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Progression from 0.0 to 1.0 over a duration, with configurable easing.
///
/// Tracks elapsed time as [`Duration`] internally for precise accumulation
/// (no floating-point drift) and accurate overshoot calculation.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween with the given duration and default linear easing.
    ///
    /// A zero duration is clamped to 1ns so the tween completes on the
    /// first tick instead of dividing by zero.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    pub fn raw_progress(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        t.clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
