//! Drawing surfaces handed to components during the host's paint pass.
//!
//! A [`Canvas`] is viewport-relative: `(0, 0)` is the top-left corner of the
//! component, whatever the scroll state of the content underneath.

use crate::{Color, Px, PxPosition, PxSize};

/// A primitive emitted by a component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// A filled circle.
    Circle {
        /// Circle center.
        center: PxPosition,
        /// Circle radius.
        radius: Px,
        /// Fill color.
        color: Color,
    },
}

/// A surface components paint onto.
pub trait Canvas {
    /// Returns the drawable area of the component.
    fn size(&self) -> PxSize;

    /// Fills a circle.
    fn fill_circle(&mut self, center: PxPosition, radius: Px, color: Color);

    /// Replays a recorded command onto this canvas.
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => self.fill_circle(center, radius, color),
        }
    }
}

/// A canvas that records every command, for assertions in tests.
#[cfg(feature = "testing")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    size: PxSize,
    commands: Vec<DrawCommand>,
}

#[cfg(feature = "testing")]
impl RecordingCanvas {
    /// Creates an empty recording canvas of the given size.
    pub fn new(size: PxSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Returns the recorded commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

#[cfg(feature = "testing")]
impl Canvas for RecordingCanvas {
    fn size(&self) -> PxSize {
        self.size
    }

    fn fill_circle(&mut self, center: PxPosition, radius: Px, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
