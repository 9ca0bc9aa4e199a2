//! Click ripples: short-lived expanding rings drawn where the user clicks.
//!
//! Ripple ids come from a [`Sequence`] owned by the layer, so a freshly
//! mounted layer always starts numbering at zero.

#[cfg(test)]
#[path = "ripple_test.rs"]
mod ripple_test;

use crate::config::ACCENT;
use crate::consts::*;
use crate::geom::Point;
use crate::render::Surface;

/// Monotonic id source scoped to its owner.
#[derive(Debug, Default)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: u64,
    pub center: Point,
    pub born_ms: f64,
}

impl Ripple {
    /// Expansion progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        ((now_ms - self.born_ms) / RIPPLE_EXPAND_MS).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn radius(&self, now_ms: f64) -> f64 {
        RIPPLE_BASE_RADIUS * RIPPLE_MAX_SCALE * self.progress(now_ms)
    }

    #[must_use]
    pub fn alpha(&self, now_ms: f64) -> f64 {
        RIPPLE_START_ALPHA * (1.0 - self.progress(now_ms))
    }

    #[must_use]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.born_ms >= RIPPLE_LIFETIME_MS
    }
}

#[derive(Debug, Default)]
pub struct RippleLayer {
    seq: Sequence,
    ripples: Vec<Ripple>,
}

impl RippleLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a ripple at `center` and return its id.
    pub fn spawn(&mut self, center: Point, now_ms: f64) -> u64 {
        let id = self.seq.next_id();
        self.ripples.push(Ripple { id, center, born_ms: now_ms });
        id
    }

    /// Drop every ripple whose lifetime has elapsed.
    pub fn expire(&mut self, now_ms: f64) {
        self.ripples.retain(|r| !r.is_expired(now_ms));
    }

    /// Stroke every live ring that is still visible.
    ///
    /// # Errors
    ///
    /// Returns the surface's error from the first failing draw call.
    pub fn draw<S: Surface>(&self, surface: &mut S, now_ms: f64) -> Result<(), S::Error> {
        for ripple in &self.ripples {
            let alpha = ripple.alpha(now_ms);
            let radius = ripple.radius(now_ms);
            if alpha <= 0.0 || radius <= 0.0 {
                continue;
            }
            surface.stroke_circle(ripple.center, radius, RIPPLE_LINE_WIDTH, ACCENT.with_alpha(alpha))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}
