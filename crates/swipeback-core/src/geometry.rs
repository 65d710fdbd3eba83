#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in logical points, origin at top-left.
///
/// Unlike a layout cell grid, screen frames move continuously during a
/// transition, so every component is `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Same size, origin moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same rectangle with the horizontal origin replaced.
    #[inline]
    #[must_use]
    pub fn with_x(&self, x: f64) -> Rect {
        Rect { x, ..*self }
    }

    /// Interpolate the horizontal origin toward `to` by `t` in [0, 1].
    ///
    /// Only `x` moves; the other components are taken from `to`. Swipe
    /// transitions are purely horizontal, so a screen whose frame differs
    /// from the target in size snaps to the target size immediately.
    #[must_use]
    pub fn lerp_x(&self, to: &Rect, t: f64) -> Rect {
        let t = t.clamp(0.0, 1.0);
        to.with_x(self.x + (to.x - self.x) * t)
    }
}

/// A 2D vector: drag translation in points or velocity in points/second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector::new(0.0, 0.0);

    /// Create a vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether the horizontal component dominates (ties count as horizontal).
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.x.abs() >= self.y.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_by_keeps_size() {
        let r = Rect::from_size(320.0, 480.0).offset_by(-60.0, 0.0);
        assert_eq!(r, Rect::new(-60.0, 0.0, 320.0, 480.0));
    }

    #[test]
    fn lerp_x_endpoints() {
        let a = Rect::new(320.0, 0.0, 320.0, 480.0);
        let b = Rect::from_size(320.0, 480.0);
        assert_eq!(a.lerp_x(&b, 0.0), a);
        assert_eq!(a.lerp_x(&b, 1.0), b);
        assert!((a.lerp_x(&b, 0.5).x - 160.0).abs() < 1e-9);
    }

    #[test]
    fn lerp_x_clamps_t() {
        let a = Rect::new(100.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.lerp_x(&b, 2.0), b);
        assert_eq!(a.lerp_x(&b, -1.0), a);
    }

    #[test]
    fn horizontal_tie_counts() {
        assert!(Vector::new(5.0, -5.0).is_horizontal());
        assert!(Vector::new(-6.0, 2.0).is_horizontal());
        assert!(!Vector::new(1.0, 3.0).is_horizontal());
        assert!(Vector::ZERO.is_horizontal());
    }
}
