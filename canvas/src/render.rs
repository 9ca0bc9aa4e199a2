//! Rendering: the drawing-surface seam.
//!
//! The field and ripple layers draw through the [`Surface`] trait and never
//! touch the browser directly. [`web_sys::CanvasRenderingContext2d`] is the
//! production surface; tests use a recorder that captures every call.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::geom::{Point, Viewport};

/// An sRGB colour with a floating-point alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string, as accepted by `fillStyle` / `strokeStyle`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Something the backdrop can paint onto.
pub trait Surface {
    type Error;

    /// Erase the whole viewport.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the clear fails.
    fn clear(&mut self, viewport: Viewport) -> Result<(), Self::Error>;

    /// Fill a circle.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the path cannot be built.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), Self::Error>;

    /// Stroke a circle outline.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the path cannot be built.
    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) -> Result<(), Self::Error>;

    /// Stroke a straight segment.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the stroke fails.
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) -> Result<(), Self::Error>;
}

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.set_fill_style_str(&color.css());
        self.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.set_stroke_style_str(&color.css());
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba) -> Result<(), JsValue> {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.set_stroke_style_str(&color.css());
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }
}
