//! Pointer state and the host events the backdrop subscribes to.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::POINTER_OFFSCREEN;
use crate::geom::Point;

/// Last known pointer position, or the off-screen sentinel when the pointer
/// has not entered the viewport (or has left it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::offscreen()
    }
}

impl PointerState {
    #[must_use]
    pub fn offscreen() -> Self {
        Self { x: POINTER_OFFSCREEN, y: POINTER_OFFSCREEN }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn is_offscreen(&self) -> bool {
        *self == Self::offscreen()
    }

    pub fn move_to(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    pub fn leave(&mut self) {
        *self = Self::offscreen();
    }
}

/// Host events a mounted backdrop listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    PointerLeave,
    Click,
}

impl EventKind {
    /// Every event a mount registers, in registration order.
    pub const ALL: [EventKind; 4] = [Self::Resize, Self::PointerMove, Self::PointerLeave, Self::Click];

    /// DOM event name.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::PointerMove => "mousemove",
            Self::PointerLeave => "mouseleave",
            Self::Click => "click",
        }
    }

    /// Whether the DOM listener belongs on `document` rather than `window`.
    /// `mouseleave` only fires on the document element.
    #[must_use]
    pub fn on_document(self) -> bool {
        matches!(self, Self::PointerLeave)
    }
}
