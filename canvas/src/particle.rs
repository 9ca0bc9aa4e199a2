//! A single point-mass in the backdrop field.

use rand::Rng;

use crate::config::FieldConfig;
use crate::geom::{Point, Viewport, wrap_coord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    /// Spawn a particle uniformly inside `viewport` with a small random
    /// velocity and a radius/opacity drawn from the config ranges.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &FieldConfig) -> Self {
        let (r_min, r_max) = config.radius_range;
        let (o_min, o_max) = config.opacity_range;
        Self {
            x: rng.random::<f64>() * viewport.width,
            y: rng.random::<f64>() * viewport.height,
            vx: centered(rng, config.initial_speed_span),
            vy: centered(rng, config.initial_speed_span),
            radius: r_min + rng.random::<f64>() * (r_max - r_min),
            opacity: o_min + rng.random::<f64>() * (o_max - o_min),
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Toroidal wrap into `[-margin, extent + margin]` on both axes.
    pub fn wrap(&mut self, viewport: Viewport, margin: f64) {
        self.x = wrap_coord(self.x, viewport.width, margin);
        self.y = wrap_coord(self.y, viewport.height, margin);
    }

    /// Add uniform noise in `[-span/2, span/2)` to both velocity components.
    pub fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R, span: f64) {
        self.vx += centered(rng, span);
        self.vy += centered(rng, span);
    }
}

fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * span
}
