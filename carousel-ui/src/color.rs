//! Colors.

use bytemuck::{Pod, Zeroable};

/// A color in linear RGBA, each channel in `[0.0, 1.0]`.
///
/// The layout is `repr(C)` so that dot instances can be uploaded to a GPU
/// buffer without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a color from four channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    ///
    /// ```
    /// use carousel_ui::Color;
    ///
    /// let opaque_red = Color::from_argb_u32(0xFFFF_0000);
    /// assert_eq!(opaque_red, Color::RED);
    /// ```
    #[inline]
    pub fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba_u8(r, g, b, a)
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_unpacking() {
        let color = Color::from_argb_u32(0xFFFF_0000);
        assert_eq!(color, Color::RED);

        let dim = Color::from_argb_u32(0x66FF_FFFF);
        assert!((dim.a - 0x66 as f32 / 255.0).abs() < f32::EPSILON);
        assert_eq!(dim.r, 1.0);
    }
}
