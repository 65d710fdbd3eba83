#![forbid(unsafe_code)]

//! Core: geometry, animation curves, and gesture interpretation.
//!
//! # Role in swipeback
//! `swipeback-core` holds the leaf pieces of a swipe-to-go-back transition.
//! Nothing in here knows about screens or navigation stacks; it turns raw
//! drag samples into progress and intent, and time into curve values.
//!
//! # Primary responsibilities
//! - **GestureInterpreter**: drag samples to `(progress, completion intent)`.
//! - **Animation**: easing, [`animation::Tween`], [`animation::Spring`],
//!   and a [`animation::FrameClock`] for wall-clock driven ticks.
//! - **Geometry**: floating-point [`geometry::Rect`] and [`geometry::Vector`].
//!
//! # How it fits in the system
//! The `swipeback` crate owns the transition state machine and consumes
//! these types to drive a navigation container's screens.

pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
