//! The particle field: fixed-size point-masses with pointer repulsion and
//! proximity links.
//!
//! DESIGN
//! ======
//! [`FieldCore`] owns every particle and the pointer position and never
//! touches the browser. One call to [`FieldCore::frame`] is one display
//! frame: clear, advance and draw each particle, then draw links for every
//! unordered pair closer than the connection distance. The particle count is
//! fixed at construction.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use rand::Rng;

use crate::config::{FieldConfig, FieldConfigError};
use crate::geom::{Point, Viewport};
use crate::input::PointerState;
use crate::particle::Particle;
use crate::render::Surface;

/// A link between two particles, ready to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub from: Point,
    pub to: Point,
    pub alpha: f64,
}

pub struct FieldCore {
    config: FieldConfig,
    viewport: Viewport,
    pointer: PointerState,
    particles: Vec<Particle>,
}

impl FieldCore {
    /// Build a field of `config.count` randomly placed particles.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Result<Self, FieldConfigError> {
        config.validate()?;
        let particles = (0..config.count)
            .map(|_| Particle::spawn(rng, viewport, &config))
            .collect();
        Ok(Self { config, viewport, pointer: PointerState::default(), particles })
    }

    /// Build a field from explicit particles. `particles.len()` must equal
    /// `config.count`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or the count differs.
    pub fn with_particles(
        config: FieldConfig,
        viewport: Viewport,
        particles: Vec<Particle>,
    ) -> Result<Self, FieldConfigError> {
        config.validate()?;
        if particles.len() != config.count {
            return Err(FieldConfigError::CountMismatch { expected: config.count, actual: particles.len() });
        }
        Ok(Self { config, viewport, pointer: PointerState::default(), particles })
    }

    // --- Inputs ---

    /// Adopt a new viewport size. Particles outside it wrap on the next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer_move(&mut self, p: Point) {
        self.pointer.move_to(p);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    // --- Frame ---

    /// Advance every particle by one frame without drawing.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // The sentinel is far outside any repulsion radius.
        let pointer = (!self.pointer.is_offscreen()).then(|| self.pointer.position());
        for p in &mut self.particles {
            advance(p, pointer, &self.config, self.viewport, rng);
        }
    }

    /// Run one full frame: clear, advance every particle, draw the particles,
    /// then draw the connection lines. Particles move independently of each
    /// other, so advancing all before drawing any yields the same picture.
    ///
    /// # Errors
    ///
    /// Returns the surface's error from the first failing draw call.
    pub fn frame<S: Surface, R: Rng + ?Sized>(&mut self, surface: &mut S, rng: &mut R) -> Result<(), S::Error> {
        surface.clear(self.viewport)?;
        self.step(rng);

        let color = self.config.color;
        for p in &self.particles {
            surface.fill_circle(p.position(), p.radius, color.with_alpha(p.opacity))?;
        }

        for link in self.connections() {
            surface.stroke_line(link.from, link.to, self.config.line_width, color.with_alpha(link.alpha))?;
        }
        Ok(())
    }

    /// Every unordered pair `(a, b)`, `a < b`, closer than the connection
    /// distance.
    #[must_use]
    pub fn connections(&self) -> Vec<Connection> {
        let mut out = Vec::new();
        for (a, p) in self.particles.iter().enumerate() {
            for (offset, q) in self.particles[a + 1..].iter().enumerate() {
                let dist = p.position().distance(q.position());
                if let Some(alpha) = connection_alpha(dist, self.config.connection_distance, self.config.line_alpha_max) {
                    out.push(Connection { a, b: a + 1 + offset, from: p.position(), to: q.position(), alpha });
                }
            }
        }
        out
    }

    // --- Queries ---

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

/// Velocity impulse the pointer applies to a particle at `at`.
///
/// `None` when the pointer is at or beyond `radius`, or exactly on the
/// particle (no direction to push in).
#[must_use]
pub fn repulsion_impulse(at: Point, pointer: Point, radius: f64, strength: f64) -> Option<(f64, f64)> {
    let dx = pointer.x - at.x;
    let dy = pointer.y - at.y;
    let dist = dx.hypot(dy);
    if dist <= 0.0 || dist >= radius {
        return None;
    }
    let force = (radius - dist) / radius;
    Some((-(dx / dist) * force * strength, -(dy / dist) * force * strength))
}

/// Line alpha for two particles `dist` apart. `None` at or beyond `threshold`.
#[must_use]
pub fn connection_alpha(dist: f64, threshold: f64, max_alpha: f64) -> Option<f64> {
    (dist < threshold).then(|| max_alpha * (1.0 - dist / threshold))
}

fn advance<R: Rng + ?Sized>(
    p: &mut Particle,
    pointer: Option<Point>,
    cfg: &FieldConfig,
    viewport: Viewport,
    rng: &mut R,
) {
    let impulse = pointer.and_then(|at| repulsion_impulse(p.position(), at, cfg.repulsion_radius, cfg.repulsion_strength));
    if let Some((ix, iy)) = impulse {
        p.vx += ix;
        p.vy += iy;
    }

    p.x += p.vx;
    p.y += p.vy;
    p.wrap(viewport, cfg.wrap_margin);

    p.vx *= cfg.damping;
    p.vy *= cfg.damping;

    if p.speed() < cfg.min_speed {
        p.jitter(rng, cfg.jitter);
    }
}
