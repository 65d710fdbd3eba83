#![forbid(unsafe_code)]

//! Gesture interpretation: turns horizontal drag samples into transition
//! progress and a finish/cancel decision.
//!
//! [`GestureInterpreter`] consumes the [`GestureSample`]s of one drag, in
//! phase order, and emits [`GestureIntent`]s for the transition controller.
//!
//! # State Machine
//!
//! - `Began` emits [`GestureIntent::StartTransition`]. The navigation pop is
//!   committed at this point, before any visual progress.
//! - `Changed` emits [`GestureIntent::UpdateProgress`] with
//!   `clamp(dx / width, 0, 1)` and updates the completion intent.
//! - `Ended` emits [`GestureIntent::Finish`] if the intent is to complete,
//!   otherwise [`GestureIntent::Cancel`]. `Cancelled` always cancels.
//!
//! # Invariants
//!
//! 1. Progress is always in [0.0, 1.0].
//! 2. A horizontal velocity above `fling_velocity` forces completion; below
//!    `-fling_velocity` forces cancellation. Otherwise the intent is
//!    `progress > completion_threshold`.
//! 3. The completion intent persists across `Changed` samples of one drag
//!    and is reset to `false` by `Began`.
//! 4. `Cancelled` never yields `Finish`.
//!
//! # Failure Modes
//!
//! - A zero, negative, or non-finite screen width produces progress 0.0
//!   rather than NaN or infinity.
//! - `Ended` without any `Changed` cancels (the intent is still `false`).

use crate::geometry::Vector;

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// Lifecycle phase of a drag, as reported by the gesture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of a drag, relative to where it began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Accumulated translation since `Began`, in points.
    pub translation: Vector,
    /// Current velocity, in points per second.
    pub velocity: Vector,
    pub phase: GesturePhase,
}

impl GestureSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(phase: GesturePhase, translation: Vector, velocity: Vector) -> Self {
        Self {
            translation,
            velocity,
            phase,
        }
    }

    /// A `Began` sample with the given initial translation and no velocity.
    #[must_use]
    pub const fn began(dx: f64, dy: f64) -> Self {
        Self::new(GesturePhase::Began, Vector::new(dx, dy), Vector::ZERO)
    }

    /// A `Changed` sample with horizontal translation `dx` and velocity `vx`.
    #[must_use]
    pub const fn changed(dx: f64, vx: f64) -> Self {
        Self::new(
            GesturePhase::Changed,
            Vector::new(dx, 0.0),
            Vector::new(vx, 0.0),
        )
    }

    /// An `Ended` sample.
    #[must_use]
    pub const fn ended() -> Self {
        Self::new(GesturePhase::Ended, Vector::ZERO, Vector::ZERO)
    }

    /// A `Cancelled` sample.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::new(GesturePhase::Cancelled, Vector::ZERO, Vector::ZERO)
    }
}

/// What the controller should do in response to a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// Commit the pop and start an interactive transition.
    StartTransition,
    /// Move the interactive transition to this progress.
    UpdateProgress(f64),
    /// Settle the transition to completion.
    Finish,
    /// Settle the transition back to where it started.
    Cancel,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for completion decisions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Horizontal speed (points/sec) beyond which a fling decides the outcome
    /// regardless of position (default: 300.0).
    pub fling_velocity: f64,
    /// Progress above which a slow release completes (default: 0.5).
    pub completion_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            fling_velocity: 300.0,
            completion_threshold: 0.5,
        }
    }
}

impl GestureConfig {
    /// Validate thresholds; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.fling_velocity.is_finite() || self.fling_velocity < 0.0 {
            errors.push(format!(
                "gesture.fling_velocity must be finite and >= 0, got {}",
                self.fling_velocity
            ));
        }
        if !(0.0..=1.0).contains(&self.completion_threshold) {
            errors.push(format!(
                "gesture.completion_threshold must be in [0, 1], got {}",
                self.completion_threshold
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Pure rules
// ---------------------------------------------------------------------------

/// Fraction of `width` covered by a horizontal translation, clamped to [0, 1].
#[must_use]
pub fn progress_for(dx: f64, width: f64) -> f64 {
    if !(width.is_finite() && width > 0.0) || dx.is_nan() {
        return 0.0;
    }
    (dx / width).clamp(0.0, 1.0)
}

/// Completion decision for a sample at `progress` moving at `vx`.
#[must_use]
pub fn completion_intent_for(progress: f64, vx: f64, config: &GestureConfig) -> bool {
    if vx > config.fling_velocity {
        true
    } else if vx < -config.fling_velocity {
        false
    } else {
        progress > config.completion_threshold
    }
}

// ---------------------------------------------------------------------------
// GestureInterpreter
// ---------------------------------------------------------------------------

/// Reducer over the samples of one drag.
///
/// Stateless per sample except for the completion intent, which carries
/// over between `Changed` samples.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    config: GestureConfig,
    completion_intent: bool,
    progress: f64,
}

impl GestureInterpreter {
    /// Create an interpreter with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            completion_intent: false,
            progress: 0.0,
        }
    }

    /// Whether a drag starting with `sample` should be recognized at all.
    ///
    /// Only predominantly horizontal drags (`|dx| >= |dy|`) qualify, so the
    /// swipe does not steal vertical scrolling. Evaluated once per drag.
    #[must_use]
    pub fn should_begin(&self, sample: &GestureSample) -> bool {
        sample.translation.is_horizontal()
    }

    /// Interpret one sample of the current drag.
    ///
    /// `screen_width` is the width of the view the drag is attached to.
    pub fn interpret(&mut self, sample: &GestureSample, screen_width: f64) -> Option<GestureIntent> {
        match sample.phase {
            GesturePhase::Began => {
                self.completion_intent = false;
                self.progress = 0.0;
                crate::trace!("swipe gesture began");
                Some(GestureIntent::StartTransition)
            }
            GesturePhase::Changed => {
                let progress = progress_for(sample.translation.x, screen_width);
                self.progress = progress;
                self.completion_intent =
                    completion_intent_for(progress, sample.velocity.x, &self.config);
                Some(GestureIntent::UpdateProgress(progress))
            }
            GesturePhase::Ended if self.completion_intent => {
                crate::debug!(progress = self.progress, "swipe gesture finishes");
                Some(GestureIntent::Finish)
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                crate::trace!(phase = ?sample.phase, "swipe gesture cancels");
                Some(GestureIntent::Cancel)
            }
        }
    }

    /// Current completion intent.
    #[inline]
    #[must_use]
    pub fn completion_intent(&self) -> bool {
        self.completion_intent
    }

    /// Progress of the most recent `Changed` sample.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Forget the current drag.
    pub fn reset(&mut self) {
        self.completion_intent = false;
        self.progress = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
