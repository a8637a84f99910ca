//! Easing curves for page transitions.
//!
//! Every curve maps linear progress in `[0.0, 1.0]` to eased progress in
//! `[0.0, 1.0]`, with `f(0) == 0` and `f(1) == 1`. Input outside the range
//! is clamped.

/// An easing curve.
pub type Easing = fn(f32) -> f32;

/// Quintic ease-out, `f(t) = (t - 1)^5 + 1`.
///
/// Starts fast and decelerates hard at the end, so a settling page appears
/// to glide into place.
pub fn quintic_ease_out(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0) - 1.0;
    t.powi(5) + 1.0
}

/// Identity curve.
pub fn linear(progress: f32) -> f32 {
    progress.clamp(0.0, 1.0)
}
