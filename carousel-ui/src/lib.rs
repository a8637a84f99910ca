//! Foundation primitives for carousel components.
//!
//! This crate holds the units and drawing surface that components share:
//!
//! - [`Px`], [`PxPosition`] and [`PxSize`] for physical pixel geometry
//! - [`Dp`] for density-independent sizes, scaled through [`dp::SCALE_FACTOR`]
//! - [`Color`] for linear RGBA colors
//! - [`Canvas`], the surface a host hands to components during its paint pass
//!
//! # Example
//!
//! ```
//! use carousel_ui::{Color, Dp, Px, PxPosition};
//!
//! let radius: Px = Dp(5.0).into();
//! let center = PxPosition::new(Px(40), Px(300));
//! let dim = Color::from_argb_u32(0x66FF_FFFF);
//!
//! assert_eq!(radius, Px(5));
//! assert_eq!(center.offset(Px(20), Px::ZERO).x, Px(60));
//! assert!(dim.a < 0.5);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod canvas;
pub mod color;
pub mod dp;
pub mod px;

pub use crate::{
    canvas::{Canvas, DrawCommand},
    color::Color,
    dp::Dp,
    px::{Px, PxPosition, PxSize},
};

#[cfg(feature = "testing")]
pub use crate::canvas::RecordingCanvas;
