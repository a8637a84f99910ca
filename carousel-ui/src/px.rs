//! Physical pixel geometry.
//!
//! Physical pixels map one-to-one onto the host surface. Components that
//! place content (dots, pages, drag offsets) work in these units and only
//! convert from [`Dp`] at configuration time.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the drawing surface
//! - X-axis increases to the right
//! - Y-axis increases downward
//! - Negative coordinates are allowed for content scrolled off-screen
//!
//! # Example
//!
//! ```
//! use carousel_ui::px::{Px, PxPosition, PxSize};
//!
//! let size = PxSize::new(Px(360), Px(200));
//! let dot = PxPosition::new(Px(180), size.height - Px(10));
//!
//! assert_eq!(dot.offset(Px(20), Px::ZERO), PxPosition::new(Px(200), Px(190)));
//! ```

use std::ops::{Add, Mul, Sub};

use crate::dp::Dp;

/// A single physical pixel coordinate or length.
///
/// Arithmetic between `Px` values is plain `i32` arithmetic; use the
/// saturating helpers where inputs may come from untrusted layout math.
///
/// # Examples
///
/// ```
/// use carousel_ui::px::Px;
///
/// let extent = Px::new(360);
/// assert_eq!(extent * 2, Px(720));
/// assert_eq!(Px::MAX.saturating_add(Px(1)), Px::MAX);
/// assert_eq!(Px::saturating_from_f64(-12.9), Px(-12));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` from a raw value. Negative values are allowed.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw `i32` value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts density-independent pixels using the current scale factor.
    ///
    /// ```
    /// use carousel_ui::{Dp, Px};
    ///
    /// assert_eq!(Px::from_dp(Dp(16.0)), Px(16));
    /// ```
    pub fn from_dp(dp: Dp) -> Self {
        Px::saturating_from_f64(dp.to_pixels_f64())
    }

    /// Converts to `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Converts from `f64`, truncating toward zero and clamping to the
    /// `i32` range.
    pub fn saturating_from_f64(value: f64) -> Self {
        let clamped = value.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
        Px(clamped as i32)
    }

    /// Computes `self + rhs`, clamping at the numeric bounds.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Computes `self - rhs`, clamping at the numeric bounds.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }

    /// Computes `self * rhs`, clamping at the numeric bounds.
    pub fn saturating_mul(self, rhs: i32) -> Self {
        Px(self.0.saturating_mul(rhs))
    }

    /// Returns `self` if it is positive, otherwise zero.
    pub fn non_negative(self) -> Self {
        self.max(Px::ZERO)
    }
}

/// A 2D position in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: Px,
    /// Vertical coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
    };

    /// Creates a position from its coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `dx` and `dy`.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Horizontal extent.
    pub width: Px,
    /// Vertical extent.
    pub height: Px,
}

impl PxSize {
    /// A zero-sized area.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a size from its extents.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either extent is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= Px::ZERO || self.height <= Px::ZERO
    }
}

impl Add for Px {
    type Output = Px;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Mul<i32> for Px {
    type Output = Px;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

impl From<Dp> for Px {
    fn from(dp: Dp) -> Self {
        Px::from_dp(dp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(4);

        assert_eq!(a + b, Px(14));
        assert_eq!(a - b, Px(6));
        assert_eq!(a * 3, Px(30));
    }

    #[test]
    fn test_px_saturating() {
        assert_eq!(Px::MAX.saturating_add(Px(1)), Px::MAX);
        assert_eq!(Px(i32::MIN).saturating_sub(Px(1)), Px(i32::MIN));
        assert_eq!(Px(i32::MAX / 2 + 1).saturating_mul(2), Px::MAX);
        assert_eq!(Px::saturating_from_f64(f64::MAX), Px::MAX);
        assert_eq!(Px::saturating_from_f64(-100.7), Px(-100));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Px(-3).non_negative(), Px::ZERO);
        assert_eq!(Px(3).non_negative(), Px(3));
    }

    #[test]
    fn test_position_offset() {
        let pos = PxPosition::new(Px(10), Px(-5));
        assert_eq!(pos.offset(Px(2), Px(3)), PxPosition::new(Px(12), Px(-2)));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(PxSize::ZERO.is_empty());
        assert!(PxSize::new(Px(10), Px(0)).is_empty());
        assert!(!PxSize::new(Px(10), Px(20)).is_empty());
    }
}
