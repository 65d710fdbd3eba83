#![forbid(unsafe_code)]

//! The mutable state of one in-flight transition.

use std::fmt;

use crate::screen::ScreenId;
use crate::transition::DriveMode;

/// Monotonic identity of a session, for logs and for matching drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// State of one transition from the navigation operation that starts it
/// until its animation completes or is cancelled.
///
/// Owned by the controller; handed out by value when the transition ends.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSession {
    pub id: SessionId,
    pub mode: DriveMode,
    /// Last gesture progress, in [0, 1]. Stays 0 for timed sessions.
    pub progress: f64,
    /// Whether releasing now would complete the transition.
    pub completion_intent: bool,
    /// True while a gesture is still driving the transition.
    pub active: bool,
    /// Screen whose gesture recognizer started the session.
    pub gesture_target: Option<ScreenId>,
}

impl TransitionSession {
    /// A session driven by a drag on `target`.
    #[must_use]
    pub fn interactive(id: SessionId, target: ScreenId) -> Self {
        Self {
            id,
            mode: DriveMode::Interactive,
            progress: 0.0,
            completion_intent: false,
            active: true,
            gesture_target: Some(target),
        }
    }

    /// A session animated over a fixed duration.
    #[must_use]
    pub fn timed(id: SessionId) -> Self {
        Self {
            id,
            mode: DriveMode::Timed,
            progress: 0.0,
            completion_intent: true,
            active: false,
            gesture_target: None,
        }
    }
}
