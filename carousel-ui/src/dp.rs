//! # Density-Independent Pixels (Dp)
//!
//! Sizes that should look the same on every screen (dot radii, touch slop,
//! page gutters) are configured in [`Dp`] and converted to [`Px`](crate::Px) through
//! the global [`SCALE_FACTOR`].
//!
//! ```
//! use carousel_ui::{Dp, Px};
//!
//! let dot_radius = Dp(5.0);
//! let pixels: Px = dot_radius.into();
//! # let _ = pixels;
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Global scale factor for converting between dp and physical pixels.
///
/// The host sets it once it knows the display density, and may update it
/// when the window moves to a different monitor. Until set, a factor of
/// `1.0` is assumed.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Replaces the current scale factor.
pub fn set_scale_factor(factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(factor));
    *lock.write() = factor;
}

pub(crate) fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Dp(0.0);

    /// Creates a new `Dp` value. Usable in const contexts.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts to physical pixels as `f64` using the current scale factor.
    pub fn to_pixels_f64(&self) -> f64 {
        self.0 * scale_factor()
    }

    /// Returns `true` for negative or NaN values, which no size may take.
    pub fn is_negative(self) -> bool {
        self.0.is_nan() || self.0 < 0.0
    }
}
