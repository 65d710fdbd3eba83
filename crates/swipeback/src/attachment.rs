#![forbid(unsafe_code)]

//! Registry of screens with an installed swipe recognizer.
//!
//! # Invariants
//!
//! 1. A screen holds at most one attachment; attaching twice is a no-op.
//! 2. The root screen of the stack is never attached (nothing to pop to).
//! 3. Lookups are O(1).

use ahash::AHashSet;

use crate::screen::ScreenId;

/// Set of screens carrying a swipe recognizer.
#[derive(Debug, Clone, Default)]
pub struct AttachmentRegistry {
    attached: AHashSet<ScreenId>,
}

impl AttachmentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a recognizer on `screen` unless it is the root or already has one.
    ///
    /// Returns `true` if a new attachment was installed.
    pub fn attach(&mut self, screen: ScreenId, is_root: bool) -> bool {
        !is_root && self.attached.insert(screen)
    }

    /// Remove the attachment for a screen that left the stack.
    ///
    /// Returns `true` if the screen had one.
    pub fn detach(&mut self, screen: ScreenId) -> bool {
        self.attached.remove(&screen)
    }

    /// Whether `screen` has a recognizer.
    #[inline]
    #[must_use]
    pub fn is_attached(&self, screen: ScreenId) -> bool {
        self.attached.contains(&screen)
    }

    /// Number of installed recognizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether no recognizer is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
