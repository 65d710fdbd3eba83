#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the timed push/pop curve. Based on the classical damped spring
//! equation:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag. Higher = less oscillation.
//!   - Underdamped (c < 2√k): oscillates past target before settling
//!   - Critically damped (c = 2√k): fastest convergence without overshoot
//!   - Overdamped (c > 2√k): slow convergence, no overshoot
//!
//! Transitions describe springs by damping ratio (ζ = c / 2√k) and the time
//! they should take to settle; [`Spring::with_damping_ratio`] converts that
//! into stiffness and damping.
//!
//! # Integration
//!
//! Uses semi-implicit Euler integration for stability. Deltas longer than
//! 4ms are subdivided.
//!
//! # Invariants
//!
//! 1. `value()` returns the position clamped to [0.0, 1.0].
//! 2. `position()` returns the raw (unclamped) position.
//! 3. A spring at rest stays at rest until `reset()`.
//! 4. `reset()` returns position to the initial value and zeroes velocity.
//! 5. Stiffness is always at least 0.1 and damping non-negative.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms). Larger deltas are subdivided
/// for numerical stability with high stiffness values.
const MAX_STEP_SECS: f64 = 0.004;

/// Default rest threshold: position delta below which the spring is "at rest".
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Default velocity threshold: velocity below which (combined with position
/// threshold) the spring is considered at rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
const MIN_STIFFNESS: f64 = 0.1;

/// `ω·t` at which a critically damped spring's residual `(1 + ωt)·e^(-ωt)`
/// drops below the default rest threshold.
const SETTLE_OMEGA_T: f64 = 9.23;

/// A damped harmonic oscillator producing physically-based motion.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use swipeback_core::animation::{Animation, Spring};
///
/// let mut spring = Spring::normalized().with_damping_ratio(1.0, Duration::from_millis(400));
/// for _ in 0..25 {
///     spring.tick(Duration::from_millis(16));
/// }
/// assert!((spring.position() - 1.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`, at rest
    /// velocity.
    ///
    /// Default parameters: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Create a spring animating from 0.0 to 1.0 (normalized).
    #[must_use]
    pub fn normalized() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Derive stiffness and damping from a damping ratio and a settle time.
    ///
    /// The natural frequency is chosen so that a critically damped spring
    /// (`ratio == 1.0`) starting at rest is within the rest threshold of its
    /// target after `settle`. Other ratios keep the same natural frequency.
    #[must_use]
    pub fn with_damping_ratio(self, ratio: f64, settle: Duration) -> Self {
        let secs = settle.as_secs_f64().max(MAX_STEP_SECS);
        let omega = SETTLE_OMEGA_T / secs;
        let stiffness = omega * omega;
        self.with_stiffness(stiffness)
            .with_damping(2.0 * ratio.max(0.0) * omega)
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Jump to the target and stop.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler: velocity first, then position from new velocity.
        let displacement = self.position - self.target;
        let spring_force = -self.stiffness * displacement;
        let damping_force = -self.damping * self.velocity;
        let acceleration = spring_force + damping_force;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing if necessary for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        let vel_abs = self.velocity.abs();
        if pos_delta < self.rest_threshold && vel_abs < self.velocity_threshold {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position.clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
