#![forbid(unsafe_code)]

//! Interactive transition controller: gesture intent in, animator driving out.
//!
//! # State Machine
//!
//! ```text
//!            Began (attached, idle)                Ended | Cancelled
//!   Idle ─────────────────────────▶ InteractiveDriving ───────────────▶ Settling
//!    ▲  ▲                                   │ (pop never began)            │
//!    │  └───────────────────────────────────┘                              │
//!    │                         animator completion                         │
//!    └─────────────────────────────────────────────────────────────────────┘
//!
//!   Idle ──animate_transition (no driver)──▶ TimedDriving ──completion──▶ Idle
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`TransitionSession`] exists. A `Began` that arrives while
//!    any session exists, or while the animator is still moving screens, is
//!    dropped; no second session, no second `begin`.
//! 2. `Changed`/`Ended`/`Cancelled` only act on the session started by the
//!    same target's `Began`; strays are ignored.
//! 3. The navigation pop is requested on `Began`, before any progress. The
//!    stack mutation itself is the host's; this controller never re-enters it.
//! 4. The finish/cancel decision is made synchronously on release; only the
//!    settle animation runs later.
//!
//! # Failure Modes
//!
//! - Sample without a target, or on a screen without an attachment: ignored.
//! - Host never began the animator for a `Began` (e.g. pop refused): the
//!   release returns straight to `Idle` without a completion.

use std::fmt;
use std::time::Duration;

use swipeback_core::animation::FrameClock;
use swipeback_core::gesture::{GestureIntent, GestureInterpreter, GesturePhase, GestureSample};
use tracing::{debug, trace};
use web_time::Instant;

use crate::animator::TransitionAnimator;
use crate::attachment::AttachmentRegistry;
use crate::config::SwipeConfig;
use crate::screen::{Container, ScreenId};
use crate::session::{SessionId, TransitionSession};
use crate::transition::{Curve, DriveMode, TransitionRequest};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where the controller is in a transition's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No session.
    Idle,
    /// A drag is moving the screens.
    InteractiveDriving,
    /// The drag was released; the animator is settling.
    Settling,
    /// A programmatic push/pop is animating over the fixed duration.
    TimedDriving,
}

/// Navigation-stack work the host must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Pop the top screen, animated.
    Pop,
}

/// Token handed to the container when a gesture is driving the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractiveDriver {
    pub session: SessionId,
}

/// Terminal result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionCompletion {
    pub request: TransitionRequest,
    pub session: TransitionSession,
    /// `false` if the transition was cancelled and `from` is still shown.
    pub completed: bool,
}

type CompletionHandler = Box<dyn FnMut(&TransitionSession, bool)>;

// ---------------------------------------------------------------------------
// InteractiveTransitionController
// ---------------------------------------------------------------------------

/// Owns the gesture interpreter, the animator, the attachment registry and
/// the single in-flight session.
pub struct InteractiveTransitionController {
    interpreter: GestureInterpreter,
    pub(crate) animator: TransitionAnimator,
    attachments: AttachmentRegistry,
    session: Option<TransitionSession>,
    state: ControllerState,
    next_session: u64,
    clock: FrameClock,
    handlers: Vec<CompletionHandler>,
}

impl fmt::Debug for InteractiveTransitionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveTransitionController")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("attachments", &self.attachments.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl Default for InteractiveTransitionController {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl InteractiveTransitionController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            interpreter: GestureInterpreter::new(config.gesture),
            animator: TransitionAnimator::new(config.animator),
            attachments: AttachmentRegistry::new(),
            session: None,
            state: ControllerState::Idle,
            next_session: 0,
            clock: FrameClock::new(),
            handlers: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The in-flight session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    /// Whether a gesture is currently driving a transition.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    /// The animator, for inspection.
    #[inline]
    #[must_use]
    pub fn animator(&self) -> &TransitionAnimator {
        &self.animator
    }

    /// Attachment registry, for inspection.
    #[inline]
    #[must_use]
    pub fn attachments(&self) -> &AttachmentRegistry {
        &self.attachments
    }

    /// Register a handler run after every transition reaches its terminal state.
    pub fn on_complete(&mut self, handler: impl FnMut(&TransitionSession, bool) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    // --- Attachment lifecycle ---

    /// Install swipe recognition on `screen`. No-op for the root screen or a
    /// screen that already has it.
    pub fn attach(&mut self, screen: ScreenId, is_root: bool) -> bool {
        let installed = self.attachments.attach(screen, is_root);
        if installed {
            trace!(%screen, "swipe recognizer attached");
        }
        installed
    }

    /// Forget the recognizer of a screen that left the stack.
    pub fn detach(&mut self, screen: ScreenId) -> bool {
        self.attachments.detach(screen)
    }

    // --- Gestures ---

    /// Pre-filter: should a drag starting with `sample` on `target` be
    /// recognized as a swipe-back?
    #[must_use]
    pub fn should_begin(&self, target: Option<ScreenId>, sample: &GestureSample) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.attachments.is_attached(target)
            && !self.in_flight()
            && self.interpreter.should_begin(sample)
    }

    /// Feed one gesture sample.
    ///
    /// Returns [`NavCommand::Pop`] on an accepted `Began`; the host must then
    /// pop its stack, which reaches back here through
    /// [`TransitionProvider`](crate::provider::TransitionProvider).
    pub fn handle_gesture(
        &mut self,
        target: Option<ScreenId>,
        sample: &GestureSample,
        container: &mut dyn Container,
    ) -> Option<NavCommand> {
        let Some(target) = target else {
            trace!(phase = ?sample.phase, "gesture ignored: no target");
            return None;
        };
        if !self.attachments.is_attached(target) {
            trace!(%target, phase = ?sample.phase, "gesture ignored: target not attached");
            return None;
        }

        if sample.phase == GesturePhase::Began {
            return self.begin_gesture(target, sample, container);
        }

        let owns_session = self.state == ControllerState::InteractiveDriving
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.gesture_target == Some(target));
        if !owns_session {
            trace!(%target, phase = ?sample.phase, state = ?self.state, "gesture ignored: no session for target");
            return None;
        }

        let width = container.frame(target).map_or(0.0, |f| f.width);
        match self.interpreter.interpret(sample, width) {
            Some(GestureIntent::UpdateProgress(progress)) => {
                let intent = self.interpreter.completion_intent();
                if let Some(session) = self.session.as_mut() {
                    session.progress = progress;
                    session.completion_intent = intent;
                }
                self.animator.step(progress, container);
            }
            Some(GestureIntent::Finish) => self.release(true),
            Some(GestureIntent::Cancel) => self.release(false),
            Some(GestureIntent::StartTransition) | None => {}
        }
        None
    }

    fn begin_gesture(
        &mut self,
        target: ScreenId,
        sample: &GestureSample,
        container: &mut dyn Container,
    ) -> Option<NavCommand> {
        if self.in_flight() {
            debug!(%target, session = ?self.session.as_ref().map(|s| s.id), "began ignored: transition already in flight");
            return None;
        }
        let width = container.frame(target).map_or(0.0, |f| f.width);
        if self.interpreter.interpret(sample, width) != Some(GestureIntent::StartTransition) {
            return None;
        }

        let id = self.allocate_session();
        self.session = Some(TransitionSession::interactive(id, target));
        self.state = ControllerState::InteractiveDriving;
        debug!(%target, session = %id, "interactive pop requested");
        Some(NavCommand::Pop)
    }

    /// Decide the outcome of a released drag. The decision is final here;
    /// only the settle animation is deferred to `tick`.
    fn release(&mut self, completed: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.active = false;
        session.completion_intent = completed;
        self.interpreter.reset();

        if self.animator.is_running() {
            self.animator.end(completed);
            self.state = ControllerState::Settling;
            debug!(session = %session.id, completed, "drag released");
        } else {
            debug!(session = %session.id, "drag released before transition began; dropping session");
            self.session = None;
            self.state = ControllerState::Idle;
        }
    }

    /// A session exists or the animator is still moving screens.
    fn in_flight(&self) -> bool {
        self.session.is_some() || self.animator.is_running()
    }

    fn allocate_session(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        id
    }

    // --- Driving ---

    /// Begin the animator for `request`.
    ///
    /// With a driver, the gesture session named by it must still be active.
    /// Without one, a timed session is created, unless any session is
    /// already in flight.
    pub(crate) fn start(
        &mut self,
        request: TransitionRequest,
        driver: Option<InteractiveDriver>,
        container: &mut dyn Container,
    ) -> Option<SessionId> {
        match driver {
            Some(driver) => {
                let session = self.session.as_ref().filter(|s| s.active && s.id == driver.session);
                let Some(id) = session.map(|s| s.id) else {
                    debug!(session = %driver.session, "interactive start ignored: stale driver");
                    return None;
                };
                self.animator.set_curve(Curve::Linear);
                self.animator
                    .begin(request, DriveMode::Interactive, container)
                    .then_some(id)
            }
            None => {
                if self.in_flight() {
                    debug!(session = ?self.session.as_ref().map(|s| s.id), "timed start ignored: transition already in flight");
                    return None;
                }
                let id = self.allocate_session();
                if !self.animator.begin(request, DriveMode::Timed, container) {
                    return None;
                }
                self.session = Some(TransitionSession::timed(id));
                self.state = ControllerState::TimedDriving;
                Some(id)
            }
        }
    }

    /// Advance timed and settling animations by `dt`.
    ///
    /// Returns the completion on the tick that finishes the transition, after
    /// running the registered handlers.
    pub fn tick(&mut self, dt: Duration, container: &mut dyn Container) -> Option<TransitionCompletion> {
        let done = self.animator.tick(dt, container)?;
        self.state = ControllerState::Idle;
        let mut session = self.session.take()?;
        session.active = false;

        debug!(session = %session.id, completed = done.completed, "session finished");
        for handler in &mut self.handlers {
            handler(&session, done.completed);
        }
        Some(TransitionCompletion {
            request: done.request,
            session,
            completed: done.completed,
        })
    }

    /// [`tick`](Self::tick) with the delta since the previous `tick_at`.
    pub fn tick_at(&mut self, now: Instant, container: &mut dyn Container) -> Option<TransitionCompletion> {
        let dt = self.clock.delta(now);
        self.tick(dt, container)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
