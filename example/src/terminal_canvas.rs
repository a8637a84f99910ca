//! A canvas that renders indicator dots as a line of text.

use carousel_ui::{Canvas, Color, Px, PxPosition, PxSize};

pub struct TerminalCanvas {
    size: PxSize,
    selected: Color,
    dots: Vec<(Px, Color)>,
}

impl TerminalCanvas {
    pub fn new(size: PxSize, selected: Color) -> Self {
        Self {
            size,
            selected,
            dots: Vec::new(),
        }
    }

    /// Renders the dots painted since the last call, left to right, and
    /// forgets them.
    pub fn take_line(&mut self) -> String {
        let mut columns: Vec<(Px, bool)> = Vec::new();
        for (x, color) in self.dots.drain(..) {
            let selected = color == self.selected;
            match columns.iter_mut().find(|(column, _)| *column == x) {
                Some(column) => column.1 |= selected,
                None => columns.push((x, selected)),
            }
        }
        columns.sort_by_key(|(x, _)| *x);
        columns
            .iter()
            .map(|(_, selected)| if *selected { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Canvas for TerminalCanvas {
    fn size(&self) -> PxSize {
        self.size
    }

    fn fill_circle(&mut self, center: PxPosition, _radius: Px, color: Color) {
        self.dots.push((center.x, color));
    }
}
