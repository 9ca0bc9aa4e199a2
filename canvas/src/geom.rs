#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in viewport space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies within the viewport expanded by `margin` on every side.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn contains_with_margin(&self, p: Point, margin: f64) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }
}

/// Wrap a single coordinate across `[-margin, extent + margin]`.
///
/// Leaving past one edge re-enters at the opposite edge's margin.
#[must_use]
pub fn wrap_coord(value: f64, extent: f64, margin: f64) -> f64 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}
