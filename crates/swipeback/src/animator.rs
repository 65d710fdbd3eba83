#![forbid(unsafe_code)]

//! Slide-over-with-shadow transition between two screens.
//!
//! [`TransitionAnimator`] places the screens at their start frames on
//! [`begin`](TransitionAnimator::begin), moves them either on frame ticks
//! (timed) or on gesture progress (interactive), and on completion leaves
//! exactly one screen mounted, at rest, without a shadow.
//!
//! # Geometry
//!
//! With `W` the width of the `from` screen, `F` the final frame of `to`
//! and `u` the underlay offset (default -60):
//!
//! | Direction | Screen | Begin       | End         | Z-order      | Shadow |
//! |-----------|--------|-------------|-------------|--------------|--------|
//! | Forward   | `to`   | `F + W`     | `F`         | above `from` | yes    |
//! | Forward   | `from` | as found    | `F + u`     |              |        |
//! | Reverse   | `to`   | `F + u`     | `F`         | below `from` |        |
//! | Reverse   | `from` | as found    | `F + W`     |              | yes    |
//!
//! The shadow always sits on the screen rendered on top.
//!
//! # Invariants
//!
//! 1. At most one transition runs at a time; `begin` while running is rejected.
//! 2. `step` is a pure function of progress: stepping back to a lower value
//!    restores exactly the frames seen at that value before.
//! 3. Settling after an interactive drag is linear, from the current progress,
//!    over the remaining fraction of the duration.
//! 4. After completion: the shown screen is mounted at its end frame, the
//!    other screen is unmounted, no screen carries the shadow, and on
//!    cancellation `from` is back at horizontal offset 0.
//!
//! # Failure Modes
//!
//! - `from` or `to` unknown to the container: `begin` returns `false` and
//!   touches nothing.
//! - `step` outside an interactive drag, or with NaN progress: ignored.

use std::time::Duration;

use swipeback_core::animation::{Animation, Spring, Tween};
use swipeback_core::geometry::Rect;
use tracing::{debug, trace};

use crate::screen::{Container, ScreenId, Shadow};
use crate::transition::{Curve, Direction, DriveMode, TransitionRequest};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for the slide-over transition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AnimatorConfig {
    /// Duration of a full transition, for either curve (default: 400ms).
    #[cfg_attr(feature = "config", serde(rename = "duration_ms", with = "crate::config::duration_ms"))]
    pub duration: Duration,
    /// Horizontal offset of the screen underneath (default: -60.0).
    pub underlay_offset: f64,
    /// Shadow cast by the screen on top.
    pub shadow: Shadow,
    /// Curve for programmatic (non-gesture) transitions.
    pub timed_curve: Curve,
    /// Damping ratio of the spring curve (default: 1.0, critical).
    pub spring_damping_ratio: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(400),
            underlay_offset: -60.0,
            shadow: Shadow::default(),
            timed_curve: Curve::EaseInOutSpring,
            spring_damping_ratio: 1.0,
        }
    }
}

impl AnimatorConfig {
    /// Validate parameters; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.duration.is_zero() {
            errors.push("animator.duration must be > 0".to_string());
        }
        if !self.underlay_offset.is_finite() {
            errors.push(format!(
                "animator.underlay_offset must be finite, got {}",
                self.underlay_offset
            ));
        }
        if !(0.0..=1.0).contains(&self.shadow.opacity) {
            errors.push(format!(
                "animator.shadow.opacity must be in [0, 1], got {}",
                self.shadow.opacity
            ));
        }
        if !self.shadow.radius.is_finite() || self.shadow.radius < 0.0 {
            errors.push(format!(
                "animator.shadow.radius must be finite and >= 0, got {}",
                self.shadow.radius
            ));
        }
        if !self.spring_damping_ratio.is_finite() || self.spring_damping_ratio <= 0.0 {
            errors.push(format!(
                "animator.spring_damping_ratio must be > 0, got {}",
                self.spring_damping_ratio
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Running state
// ---------------------------------------------------------------------------

/// Reported once when a transition reaches its terminal visual state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorCompletion {
    pub request: TransitionRequest,
    /// `true` if `to` is now shown, `false` if the transition was cancelled.
    pub completed: bool,
}

#[derive(Debug, Clone)]
enum Phase {
    Timed { tween: Tween, spring: Option<Spring> },
    Interactive,
    Settling {
        start: f64,
        target: f64,
        tween: Tween,
        completed: bool,
    },
}

#[derive(Debug, Clone)]
struct Running {
    request: TransitionRequest,
    from_begin: Rect,
    from_end: Rect,
    to_begin: Rect,
    to_end: Rect,
    shadowed: ScreenId,
    progress: f64,
    phase: Phase,
}

impl Running {
    fn apply(&mut self, t: f64, container: &mut dyn Container) {
        self.progress = t;
        container.set_frame(self.request.from, self.from_begin.lerp_x(&self.from_end, t));
        container.set_frame(self.request.to, self.to_begin.lerp_x(&self.to_end, t));
    }
}

// ---------------------------------------------------------------------------
// TransitionAnimator
// ---------------------------------------------------------------------------

/// Applies the slide-over transition to a container's screens.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    config: AnimatorConfig,
    direction: Direction,
    curve: Curve,
    running: Option<Running>,
}

impl Default for TransitionAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

impl TransitionAnimator {
    /// Create an idle animator.
    #[must_use]
    pub fn new(config: AnimatorConfig) -> Self {
        let curve = config.timed_curve;
        Self {
            config,
            direction: Direction::Forward,
            curve,
            running: None,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Direction of the operation last announced to this animator.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Curve used by the next timed transition.
    #[inline]
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn set_curve(&mut self, curve: Curve) {
        self.curve = curve;
    }

    /// Transition duration. Identical for both curves.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.config.duration
    }

    /// Whether a transition is between `begin` and completion.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Whether the running transition has been released and is settling.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        matches!(
            self.running.as_ref().map(|r| &r.phase),
            Some(Phase::Settling { .. })
        )
    }

    /// Progress last applied to the screens, if running.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.running.as_ref().map(|r| r.progress)
    }

    /// Request of the running transition.
    #[must_use]
    pub fn running_request(&self) -> Option<&TransitionRequest> {
        self.running.as_ref().map(|r| &r.request)
    }

    /// Place both screens at their start frames and set z-order and shadow.
    ///
    /// Returns `false`, leaving the container untouched, if a transition is
    /// already running or either screen is unknown to the container.
    pub fn begin(
        &mut self,
        request: TransitionRequest,
        mode: DriveMode,
        container: &mut dyn Container,
    ) -> bool {
        if self.running.is_some() {
            debug!(from = %request.from, to = %request.to, "begin rejected: transition already running");
            return false;
        }
        let (Some(from_frame), Some(_)) = (container.frame(request.from), container.frame(request.to))
        else {
            trace!(from = %request.from, to = %request.to, "begin aborted: screen unknown to container");
            return false;
        };

        let width = from_frame.width;
        let final_frame = request.final_frame;
        let offset = self.config.underlay_offset;
        let shadow = Some(self.config.shadow);

        let (to_begin, from_end, shadowed) = match request.direction {
            Direction::Forward => {
                let to_begin = final_frame.offset_by(width, 0.0);
                container.set_frame(request.to, to_begin);
                container.set_shadow(request.to, shadow);
                container.add(request.to);
                (to_begin, final_frame.offset_by(offset, 0.0), request.to)
            }
            Direction::Reverse => {
                container.set_shadow(request.from, shadow);
                container.insert_below(request.to, request.from);
                let to_begin = final_frame.offset_by(offset, 0.0);
                container.set_frame(request.to, to_begin);
                (to_begin, final_frame.offset_by(width, 0.0), request.from)
            }
        };

        let phase = match mode {
            DriveMode::Interactive => Phase::Interactive,
            DriveMode::Timed => self.timed_phase(),
        };

        debug!(
            direction = ?request.direction,
            ?mode,
            curve = ?self.curve,
            from = %request.from,
            to = %request.to,
            "transition began"
        );

        self.running = Some(Running {
            request,
            from_begin: from_frame,
            from_end,
            to_begin,
            to_end: final_frame,
            shadowed,
            progress: 0.0,
            phase,
        });
        true
    }

    fn timed_phase(&self) -> Phase {
        let duration = self.config.duration;
        let spring = match self.curve {
            Curve::Linear => None,
            Curve::EaseInOutSpring => {
                Some(Spring::normalized().with_damping_ratio(self.config.spring_damping_ratio, duration))
            }
        };
        Phase::Timed {
            tween: Tween::new(duration),
            spring,
        }
    }

    /// Move both screens to `progress` in [0, 1] of the way to their end frames.
    ///
    /// Only honored while an interactive transition is being dragged.
    pub fn step(&mut self, progress: f64, container: &mut dyn Container) {
        let Some(running) = self.running.as_mut() else {
            trace!(progress, "step ignored: no transition running");
            return;
        };
        if !matches!(running.phase, Phase::Interactive) || progress.is_nan() {
            trace!(progress, "step ignored: transition not interactive");
            return;
        }
        running.apply(progress.clamp(0.0, 1.0), container);
    }

    /// Release the transition toward completion (`true`) or back to its
    /// start (`false`).
    ///
    /// Settles linearly from the current progress over the remaining
    /// fraction of the duration; the terminal state is reached on a later
    /// [`tick`](Self::tick). Ignored if already settling.
    pub fn end(&mut self, completed: bool) {
        let duration = self.config.duration;
        let Some(running) = self.running.as_mut() else {
            trace!(completed, "end ignored: no transition running");
            return;
        };
        if matches!(running.phase, Phase::Settling { .. }) {
            trace!(completed, "end ignored: already settling");
            return;
        }
        let start = running.progress;
        let target = if completed { 1.0 } else { 0.0 };
        let remaining = duration.mul_f64((target - start).abs());
        debug!(completed, progress = start, ?remaining, "transition settling");
        running.phase = Phase::Settling {
            start,
            target,
            tween: Tween::new(remaining),
            completed,
        };
    }

    /// Advance timed or settling motion by `dt`.
    ///
    /// Returns the completion exactly once, on the tick that reaches the
    /// terminal state.
    pub fn tick(&mut self, dt: Duration, container: &mut dyn Container) -> Option<AnimatorCompletion> {
        let running = self.running.as_mut()?;
        let (t, finished) = match &mut running.phase {
            Phase::Interactive => return None,
            Phase::Timed { tween, spring } => {
                tween.tick(dt);
                let t = match spring {
                    Some(spring) => {
                        spring.tick(dt);
                        spring.value()
                    }
                    None => tween.value(),
                };
                (t, tween.is_complete().then_some(true))
            }
            Phase::Settling {
                start,
                target,
                tween,
                completed,
            } => {
                tween.tick(dt);
                let t = *start + (*target - *start) * tween.value();
                (t, tween.is_complete().then_some(*completed))
            }
        };
        running.apply(t, container);

        let completed = finished?;
        let running = self.running.take()?;
        Some(Self::finish(running, completed, container))
    }

    /// Put the screens in their terminal state.
    fn finish(mut running: Running, completed: bool, container: &mut dyn Container) -> AnimatorCompletion {
        running.apply(if completed { 1.0 } else { 0.0 }, container);

        let request = running.request;
        container.set_shadow(running.shadowed, None);
        match request.direction {
            Direction::Forward => container.set_frame(request.from, request.final_frame),
            Direction::Reverse => {
                let frame = container.frame(request.from).unwrap_or(running.from_begin);
                container.set_frame(request.from, frame.with_x(0.0));
            }
        }

        if completed {
            container.set_frame(request.to, running.to_end);
            container.remove(request.from);
        } else {
            container.remove(request.to);
        }

        debug!(completed, from = %request.from, to = %request.to, "transition finished");
        AnimatorCompletion { request, completed }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    const FROM: ScreenId = ScreenId(2);
    const TO: ScreenId = ScreenId(3);
    const W: f64 = 320.0;
    const MS_16: Duration = Duration::from_millis(16);

    fn full() -> Rect {
        Rect::from_size(W, 480.0)
    }

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.register(FROM, full());
        scene.register(TO, full());
        scene.add(FROM);
        scene
    }

    fn x(scene: &Scene, id: ScreenId) -> f64 {
        scene.frame(id).map(|f| f.x).unwrap_or(f64::NAN)
    }

    fn run_to_end(animator: &mut TransitionAnimator, scene: &mut Scene) -> AnimatorCompletion {
        for _ in 0..1000 {
            if let Some(done) = animator.tick(MS_16, scene) {
                return done;
            }
        }
        panic!("transition never completed");
    }

    fn request(direction: Direction) -> TransitionRequest {
        TransitionRequest::new(direction, FROM, TO, full())
    }

    // --- begin ---

    #[test]
    fn forward_begin_places_to_offscreen_right_on_top_with_shadow() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        assert!(animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene));

        assert_eq!(x(&scene, TO), W);
        assert_eq!(scene.z_order(), &[FROM, TO]);
        assert_eq!(scene.shadow(TO), Some(Shadow::default()));
        assert_eq!(scene.shadow(FROM), None);
    }

    #[test]
    fn reverse_begin_places_to_underneath_with_shadow_on_from() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        assert!(animator.begin(request(Direction::Reverse), DriveMode::Interactive, &mut scene));

        assert_eq!(x(&scene, TO), -60.0);
        assert_eq!(scene.z_order(), &[TO, FROM]);
        assert_eq!(scene.shadow(FROM), Some(Shadow::default()));
        assert_eq!(scene.shadow(TO), None);
    }

    #[test]
    fn begin_with_unknown_screen_is_silent_noop() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        let req = TransitionRequest::new(Direction::Forward, FROM, ScreenId(77), full());
        assert!(!animator.begin(req, DriveMode::Timed, &mut scene));
        assert!(!animator.is_running());
        assert_eq!(scene.z_order(), &[FROM]);
        assert_eq!(scene.shadow(FROM), None);
        assert_eq!(x(&scene, FROM), 0.0);
    }

    #[test]
    fn begin_while_running_is_rejected() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        assert!(animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene));
        assert!(!animator.begin(request(Direction::Reverse), DriveMode::Interactive, &mut scene));
        assert_eq!(animator.running_request().map(|r| r.direction), Some(Direction::Forward));
    }

    // --- step ---

    #[test]
    fn step_interpolates_both_screens() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Reverse), DriveMode::Interactive, &mut scene);
        animator.step(0.5, &mut scene);

        assert!((x(&scene, FROM) - W / 2.0).abs() < 1e-9);
        assert!((x(&scene, TO) - -30.0).abs() < 1e-9);
    }

    #[test]
    fn step_backwards_restores_earlier_frames() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.step(0.3, &mut scene);
        let at_03 = (scene.frame(FROM), scene.frame(TO));
        animator.step(0.8, &mut scene);
        animator.step(0.3, &mut scene);
        assert_eq!((scene.frame(FROM), scene.frame(TO)), at_03);
    }

    #[test]
    fn step_clamps_and_ignores_nan() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.step(1.7, &mut scene);
        assert_eq!(x(&scene, TO), 0.0);
        animator.step(f64::NAN, &mut scene);
        assert_eq!(animator.progress(), Some(1.0));
    }

    #[test]
    fn step_ignored_in_timed_mode() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Timed, &mut scene);
        animator.step(0.9, &mut scene);
        assert_eq!(animator.progress(), Some(0.0));
    }

    // --- end ---

    #[test]
    fn forward_complete_leaves_to_at_final_and_removes_from() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.step(1.0, &mut scene);
        animator.end(true);
        let done = run_to_end(&mut animator, &mut scene);

        assert!(done.completed);
        assert_eq!(scene.frame(TO), Some(full()));
        assert_eq!(scene.z_order(), &[TO]);
        assert_eq!(scene.shadow(TO), None);
        assert!(!animator.is_running());
    }

    #[test]
    fn reverse_cancel_restores_from_and_removes_to() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Reverse), DriveMode::Interactive, &mut scene);
        animator.step(0.7, &mut scene);
        animator.end(false);
        let done = run_to_end(&mut animator, &mut scene);

        assert!(!done.completed);
        assert_eq!(x(&scene, FROM), 0.0);
        assert_eq!(scene.z_order(), &[FROM]);
        assert_eq!(scene.shadow(FROM), None);
    }

    #[test]
    fn settle_is_linear_over_remaining_fraction() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Reverse), DriveMode::Interactive, &mut scene);
        animator.step(0.5, &mut scene);
        animator.end(true);
        assert!(animator.is_settling());

        // Remaining half of 400ms is 200ms; after 100ms we are at 0.75.
        assert!(animator.tick(Duration::from_millis(100), &mut scene).is_none());
        let p = animator.progress().unwrap_or_default();
        assert!((p - 0.75).abs() < 1e-9, "progress {p}");

        assert!(animator.tick(Duration::from_millis(100), &mut scene).is_some());
    }

    #[test]
    fn end_twice_keeps_first_decision() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.step(0.6, &mut scene);
        animator.end(true);
        animator.end(false);
        assert!(run_to_end(&mut animator, &mut scene).completed);
    }

    #[test]
    fn end_at_exact_target_completes_on_next_tick() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.end(false);
        let done = animator.tick(Duration::from_millis(1), &mut scene);
        assert_eq!(done.map(|d| d.completed), Some(false));
        assert_eq!(scene.z_order(), &[FROM]);
    }

    #[test]
    fn interactive_does_not_advance_on_tick() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Interactive, &mut scene);
        animator.step(0.4, &mut scene);
        assert!(animator.tick(Duration::from_secs(5), &mut scene).is_none());
        assert_eq!(animator.progress(), Some(0.4));
    }

    // --- timed ---

    #[test]
    fn timed_spring_completes_after_duration() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.begin(request(Direction::Forward), DriveMode::Timed, &mut scene);

        let mut elapsed = Duration::ZERO;
        let done = loop {
            elapsed += MS_16;
            if let Some(done) = animator.tick(MS_16, &mut scene) {
                break done;
            }
            assert!(elapsed < Duration::from_secs(1));
        };
        assert!(done.completed);
        assert!(elapsed >= Duration::from_millis(400));
        assert_eq!(scene.frame(TO), Some(full()));
        assert_eq!(scene.z_order(), &[TO]);
    }

    #[test]
    fn timed_linear_is_halfway_at_half_duration() {
        let mut scene = scene();
        let mut animator = TransitionAnimator::default();
        animator.set_curve(Curve::Linear);
        animator.begin(request(Direction::Reverse), DriveMode::Timed, &mut scene);
        animator.tick(Duration::from_millis(200), &mut scene);
        let p = animator.progress().unwrap_or_default();
        assert!((p - 0.5).abs() < 1e-9, "progress {p}");
    }

    #[test]
    fn timed_spring_leads_linear() {
        let mut linear_scene = scene();
        let mut spring_scene = scene();
        let mut lin = TransitionAnimator::default();
        lin.set_curve(Curve::Linear);
        let mut spr = TransitionAnimator::default();
        lin.begin(request(Direction::Forward), DriveMode::Timed, &mut linear_scene);
        spr.begin(request(Direction::Forward), DriveMode::Timed, &mut spring_scene);
        lin.tick(Duration::from_millis(100), &mut linear_scene);
        spr.tick(Duration::from_millis(100), &mut spring_scene);
        assert!(spr.progress() > lin.progress());
    }

    #[test]
    fn duration_is_identical_for_both_curves() {
        let mut animator = TransitionAnimator::default();
        animator.set_curve(Curve::Linear);
        let linear = animator.duration();
        animator.set_curve(Curve::EaseInOutSpring);
        assert_eq!(animator.duration(), linear);
        assert_eq!(linear, Duration::from_millis(400));
    }

    #[test]
    fn config_validation() {
        assert!(AnimatorConfig::default().validate().is_empty());
        let bad = AnimatorConfig {
            duration: Duration::ZERO,
            spring_damping_ratio: 0.0,
            ..AnimatorConfig::default()
        };
        assert_eq!(bad.validate().len(), 2);
    }
}
