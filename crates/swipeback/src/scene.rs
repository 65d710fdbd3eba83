#![forbid(unsafe_code)]

//! In-memory [`Container`]: frames, shadows and z-order without a renderer.
//!
//! Useful for headless hosts and for asserting the visual state a
//! transition leaves behind.

use ahash::AHashMap;
use swipeback_core::geometry::Rect;

use crate::screen::{Container, ScreenId, Shadow};

#[derive(Debug, Clone, Copy)]
struct Surface {
    frame: Rect,
    shadow: Option<Shadow>,
}

/// A z-ordered set of screen surfaces.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    surfaces: AHashMap<ScreenId, Surface>,
    /// Mounted screens, back to front.
    order: Vec<ScreenId>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `screen` known with the given frame, without mounting it.
    pub fn register(&mut self, screen: ScreenId, frame: Rect) {
        self.surfaces.insert(
            screen,
            Surface {
                frame,
                shadow: None,
            },
        );
    }

    /// Forget `screen` entirely.
    pub fn unregister(&mut self, screen: ScreenId) {
        self.surfaces.remove(&screen);
        self.order.retain(|&s| s != screen);
    }

    /// Whether `screen` is currently mounted.
    #[must_use]
    pub fn is_mounted(&self, screen: ScreenId) -> bool {
        self.order.contains(&screen)
    }

    /// Mounted screens, back to front.
    #[must_use]
    pub fn z_order(&self) -> &[ScreenId] {
        &self.order
    }

    /// The frontmost mounted screen.
    #[must_use]
    pub fn topmost(&self) -> Option<ScreenId> {
        self.order.last().copied()
    }

    /// Shadow currently applied to `screen`.
    #[must_use]
    pub fn shadow(&self, screen: ScreenId) -> Option<Shadow> {
        self.surfaces.get(&screen).and_then(|s| s.shadow)
    }

    /// Number of mounted screens.
    #[must_use]
    pub fn mounted_len(&self) -> usize {
        self.order.len()
    }

    fn unmount(&mut self, screen: ScreenId) {
        self.order.retain(|&s| s != screen);
    }
}

impl Container for Scene {
    fn frame(&self, screen: ScreenId) -> Option<Rect> {
        self.surfaces.get(&screen).map(|s| s.frame)
    }

    fn set_frame(&mut self, screen: ScreenId, frame: Rect) {
        if let Some(surface) = self.surfaces.get_mut(&screen) {
            surface.frame = frame;
        }
    }

    fn set_shadow(&mut self, screen: ScreenId, shadow: Option<Shadow>) {
        if let Some(surface) = self.surfaces.get_mut(&screen) {
            surface.shadow = shadow;
        }
    }

    fn add(&mut self, screen: ScreenId) {
        if !self.surfaces.contains_key(&screen) {
            return;
        }
        self.unmount(screen);
        self.order.push(screen);
    }

    /// Falls back to [`add`](Container::add) when `sibling` is not mounted.
    fn insert_below(&mut self, screen: ScreenId, sibling: ScreenId) {
        if !self.surfaces.contains_key(&screen) || screen == sibling {
            return;
        }
        self.unmount(screen);
        match self.order.iter().position(|&s| s == sibling) {
            Some(idx) => self.order.insert(idx, screen),
            None => self.order.push(screen),
        }
    }

    fn remove(&mut self, screen: ScreenId) {
        self.unmount(screen);
    }
}
