//! Dot strip showing which page is selected.
//!
//! ## Usage
//!
//! Call [`CarouselIndicator::draw`] from the host's paint pass, after the
//! pages have been painted. The indicator keeps no state and does no index
//! math: it is handed the page count and the already resolved selection.

use carousel_ui::{Canvas, Color, Dp, Px, PxPosition, PxSize};
use derive_setters::Setters;
use smallvec::SmallVec;

use crate::error::CarouselError;

/// Appearance of the dot strip.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
pub struct IndicatorStyle {
    /// Radius of each dot.
    pub dot_radius: Dp,
    /// Color of unselected dots.
    pub background_color: Color,
    /// Color of the selected dot.
    pub selected_color: Color,
}

impl IndicatorStyle {
    /// Checks the style can be drawn.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NegativeDotRadius`] for a negative or NaN
    /// radius.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.dot_radius.is_negative() {
            return Err(CarouselError::NegativeDotRadius(self.dot_radius.0));
        }
        Ok(())
    }
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            dot_radius: Dp(5.0),
            background_color: Color::from_argb_u32(0x66FF_FFFF),
            selected_color: Color::RED,
        }
    }
}

/// One dot to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorDot {
    /// Dot center, relative to the carousel's top-left corner.
    pub center: PxPosition,
    /// Dot radius.
    pub radius: Px,
    /// Fill color.
    pub color: Color,
}

/// Stateless dot strip renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CarouselIndicator;

impl CarouselIndicator {
    /// Lays out the dots in paint order: every dot in the background color,
    /// then the selected one again in the selected color.
    ///
    /// Dot centres are two diameters apart, the strip is centred
    /// horizontally and the dots sit one diameter above the bottom edge. A
    /// selection outside `0..count` only paints the background dots.
    pub fn layout(
        count: usize,
        selected: Option<usize>,
        style: &IndicatorStyle,
        area: PxSize,
    ) -> SmallVec<[IndicatorDot; 8]> {
        let mut dots = SmallVec::new();
        if count == 0 {
            return dots;
        }

        let radius = Px::from(style.dot_radius);
        let diameter = radius.saturating_mul(2);
        let pitch = diameter.saturating_mul(2);
        let count_px = i32::try_from(count).unwrap_or(i32::MAX);
        let strip = pitch.saturating_mul(count_px);
        let first_x = Px::saturating_from_f64((f64::from(area.width.0) - f64::from(strip.0)) / 2.0)
            .saturating_add(diameter);
        let y = area.height.saturating_sub(diameter);

        let center_of = |index: usize| {
            let index = i32::try_from(index).unwrap_or(i32::MAX);
            PxPosition::new(first_x.saturating_add(pitch.saturating_mul(index)), y)
        };

        dots.extend((0..count).map(|index| IndicatorDot {
            center: center_of(index),
            radius,
            color: style.background_color,
        }));
        if let Some(index) = selected.filter(|index| *index < count) {
            dots.push(IndicatorDot {
                center: center_of(index),
                radius,
                color: style.selected_color,
            });
        }
        dots
    }

    /// Paints the dots onto `canvas`.
    pub fn draw(
        canvas: &mut dyn Canvas,
        count: usize,
        selected: Option<usize>,
        style: &IndicatorStyle,
    ) {
        let area = canvas.size();
        for dot in Self::layout(count, selected, style, area) {
            canvas.fill_circle(dot.center, dot.radius, dot.color);
        }
    }
}
