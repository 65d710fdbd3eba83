#![forbid(unsafe_code)]

//! Sloppy swipe-to-go-back transitions for stack navigators.
//!
//! Lets the user drag from anywhere on a screen (not only the edge) to pop
//! it, with a slide-over-with-shadow transition that follows the finger,
//! can be reversed mid-drag, and settles to completion or cancellation on
//! release. Programmatic push/pop gets the same transition as a timed
//! spring animation.
//!
//! # Pieces
//!
//! - [`controller::InteractiveTransitionController`]: the state machine. It
//!   owns the gesture interpreter, the animator, the attachment registry and
//!   the single in-flight [`session::TransitionSession`].
//! - [`animator::TransitionAnimator`]: moves the two screens, manages
//!   z-order and shadow, and cleans up on completion or cancellation.
//! - [`provider::TransitionProvider`]: the hooks a navigation container calls
//!   to obtain the animator and the interactive driver for an operation.
//! - [`screen::Container`]: what the core needs from the container's view
//!   hierarchy; [`scene::Scene`] is an in-memory implementation.
//!
//! # Threading
//!
//! Everything runs on one event thread. Gesture samples, frame ticks and
//! completion handlers are all delivered by the host, in order.

pub mod animator;
pub mod attachment;
pub mod config;
pub mod controller;
pub mod provider;
pub mod scene;
pub mod screen;
pub mod session;
pub mod transition;

pub use animator::{AnimatorCompletion, AnimatorConfig, TransitionAnimator};
pub use config::{ConfigError, SwipeConfig};
pub use controller::{
    ControllerState, InteractiveDriver, InteractiveTransitionController, NavCommand,
    TransitionCompletion,
};
pub use provider::TransitionProvider;
pub use scene::Scene;
pub use screen::{Container, ScreenId, Shadow};
pub use session::{SessionId, TransitionSession};
pub use transition::{Curve, Direction, DriveMode, Operation, TransitionRequest};

pub use swipeback_core::geometry::{Rect, Vector};
pub use swipeback_core::gesture::{GestureConfig, GesturePhase, GestureSample};
