#![forbid(unsafe_code)]

//! Screen identity and the container surface the transition mutates.
//!
//! Screens are owned by the navigation container. The core only refers to
//! them by [`ScreenId`] and mutates them through [`Container`], so it never
//! holds a borrow across the asynchronous settle of an animation.

use std::fmt;

use swipeback_core::geometry::Rect;

/// Opaque identity of one screen on the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

/// Drop shadow cast by the screen rendered on top during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Shadow {
    /// RGB color.
    pub color: [u8; 3],
    /// Blur radius in points.
    pub radius: f64,
    /// Opacity in [0, 1].
    pub opacity: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            radius: 5.0,
            opacity: 0.2,
        }
    }
}

/// The view hierarchy of a navigation container, as seen by a transition.
///
/// A screen can be *known* (it has a frame) without being *mounted* (present
/// in the z-ordered hierarchy). A screen about to be pushed is known but not
/// yet mounted.
pub trait Container {
    /// Frame of a known screen, `None` if the container has never heard of it.
    fn frame(&self, screen: ScreenId) -> Option<Rect>;

    /// Move or resize a screen.
    fn set_frame(&mut self, screen: ScreenId, frame: Rect);

    /// Apply (`Some`) or strip (`None`) the drop shadow.
    fn set_shadow(&mut self, screen: ScreenId, shadow: Option<Shadow>);

    /// Mount `screen` above every other mounted screen.
    fn add(&mut self, screen: ScreenId);

    /// Mount `screen` directly below `sibling`.
    fn insert_below(&mut self, screen: ScreenId, sibling: ScreenId);

    /// Unmount `screen`. Its frame stays known.
    fn remove(&mut self, screen: ScreenId);
}
