#![forbid(unsafe_code)]

//! Transition vocabulary: operations, directions, curves and requests.

use swipeback_core::geometry::Rect;

use crate::screen::ScreenId;

/// Navigation-stack operation that triggered a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Push,
    Pop,
}

/// Which way the screens slide.
///
/// `Forward` brings a new screen in from the right over the current one;
/// `Reverse` slides the current screen away to the right, revealing the
/// previous one underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Direction for a navigation operation: push is forward, pop is reverse.
    #[inline]
    #[must_use]
    pub fn for_operation(operation: Operation) -> Self {
        match operation {
            Operation::Push => Self::Forward,
            Operation::Pop => Self::Reverse,
        }
    }
}

/// Timing curve of a transition.
///
/// Both curves run for the same configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Curve {
    Linear,
    /// Critically damped spring starting at rest.
    #[default]
    EaseInOutSpring,
}

/// How a running transition advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveMode {
    /// Animated by frame ticks over the configured duration.
    Timed,
    /// Driven by gesture progress until released.
    Interactive,
}

/// One navigation-stack operation to visualize. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    pub direction: Direction,
    /// Screen being left.
    pub from: ScreenId,
    /// Screen being shown.
    pub to: ScreenId,
    /// Where `to` rests once the transition completes.
    pub final_frame: Rect,
}

impl TransitionRequest {
    /// Create a request.
    #[must_use]
    pub const fn new(direction: Direction, from: ScreenId, to: ScreenId, final_frame: Rect) -> Self {
        Self {
            direction,
            from,
            to,
            final_frame,
        }
    }

    /// Request for a navigation operation.
    #[must_use]
    pub fn for_operation(operation: Operation, from: ScreenId, to: ScreenId, final_frame: Rect) -> Self {
        Self::new(Direction::for_operation(operation), from, to, final_frame)
    }
}
