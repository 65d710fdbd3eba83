#![forbid(unsafe_code)]

//! Hooks a navigation container calls around push/pop.
//!
//! The container owns the stack. For every operation it asks the provider
//! for an animator and, if a gesture is driving, an interactive driver; it
//! then hands both back through [`TransitionProvider::animate_transition`].
//!
//! # Call Order
//!
//! ```text
//! screen_will_show(to)            before the new top screen appears
//! animator_for(op, from, to)      configures direction, returns the animator
//! interactive_driver_for()        Some(driver) iff a gesture session is live
//! animate_transition(req, drv)    begins the animator
//! screen_did_leave(from)          after a completed pop
//! ```

use tracing::trace;

use crate::animator::TransitionAnimator;
use crate::controller::{InteractiveDriver, InteractiveTransitionController};
use crate::screen::{Container, ScreenId};
use crate::session::SessionId;
use crate::transition::{Curve, Direction, Operation, TransitionRequest};

/// Navigation container delegate.
pub trait TransitionProvider {
    /// `screen` is about to become visible. Installs swipe recognition
    /// unless it is the root of the stack.
    fn screen_will_show(&mut self, screen: ScreenId, is_root: bool);

    /// `screen` left the stack for good.
    fn screen_did_leave(&mut self, screen: ScreenId);

    /// The animator for `operation`, with its direction set.
    ///
    /// Read-only: the transition is started through
    /// [`animate_transition`](Self::animate_transition) so that it always
    /// belongs to a session.
    fn animator_for(&mut self, operation: Operation, from: ScreenId, to: ScreenId) -> &TransitionAnimator;

    /// The interactive driver, present iff a gesture is driving the
    /// transition. Selects the animator's curve as a side effect.
    fn interactive_driver_for(&mut self) -> Option<InteractiveDriver>;

    /// Start the transition. Returns the session it belongs to, or `None`
    /// if it was rejected.
    fn animate_transition(
        &mut self,
        request: TransitionRequest,
        driver: Option<InteractiveDriver>,
        container: &mut dyn Container,
    ) -> Option<SessionId>;
}

impl TransitionProvider for InteractiveTransitionController {
    fn screen_will_show(&mut self, screen: ScreenId, is_root: bool) {
        self.attach(screen, is_root);
    }

    fn screen_did_leave(&mut self, screen: ScreenId) {
        if self.detach(screen) {
            trace!(%screen, "swipe recognizer detached");
        }
    }

    fn animator_for(&mut self, operation: Operation, from: ScreenId, to: ScreenId) -> &TransitionAnimator {
        let direction = Direction::for_operation(operation);
        trace!(?operation, %from, %to, ?direction, "animator requested");
        self.animator.set_direction(direction);
        &self.animator
    }

    fn interactive_driver_for(&mut self) -> Option<InteractiveDriver> {
        let driver = self
            .session()
            .filter(|s| s.active)
            .map(|s| InteractiveDriver { session: s.id });
        let curve = match driver {
            Some(_) => Curve::Linear,
            None => self.animator.config().timed_curve,
        };
        self.animator.set_curve(curve);
        driver
    }

    fn animate_transition(
        &mut self,
        request: TransitionRequest,
        driver: Option<InteractiveDriver>,
        container: &mut dyn Container,
    ) -> Option<SessionId> {
        self.start(request, driver, container)
    }
}
