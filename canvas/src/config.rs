//! Tunable parameters for the particle field.
//!
//! Every field defaults to the value in [`crate::consts`]. A config must pass
//! [`FieldConfig::validate`] before a field is built from it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::*;
use crate::render::Rgba;

/// Accent colour shared by particles and connection lines.
pub const ACCENT: Rgba = Rgba::rgb(99, 102, 241);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FieldConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("damping must be in (0, 1], got {0}")]
    Damping(f64),
    #[error("{name} range is empty: [{min}, {max})")]
    EmptyRange { name: &'static str, min: f64, max: f64 },
    #[error("expected {expected} particles, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub connection_distance: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub damping: f64,
    pub min_speed: f64,
    pub jitter: f64,
    pub wrap_margin: f64,
    pub initial_speed_span: f64,
    pub radius_range: (f64, f64),
    pub opacity_range: (f64, f64),
    pub line_alpha_max: f64,
    pub line_width: f64,
    pub color: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            connection_distance: CONNECTION_DISTANCE,
            repulsion_radius: REPULSION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            damping: DAMPING,
            min_speed: MIN_SPEED,
            jitter: JITTER,
            wrap_margin: WRAP_MARGIN,
            initial_speed_span: INITIAL_SPEED_SPAN,
            radius_range: (RADIUS_MIN, RADIUS_MAX),
            opacity_range: (OPACITY_MIN, OPACITY_MAX),
            line_alpha_max: LINE_ALPHA_MAX,
            line_width: LINE_WIDTH,
            color: ACCENT,
        }
    }
}

impl FieldConfig {
    /// Check that every parameter describes a field that can actually animate.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter.
    pub fn validate(&self) -> Result<(), FieldConfigError> {
        positive("connection_distance", self.connection_distance)?;
        positive("repulsion_radius", self.repulsion_radius)?;
        positive("min_speed", self.min_speed)?;
        positive("jitter", self.jitter)?;
        positive("initial_speed_span", self.initial_speed_span)?;
        positive("line_width", self.line_width)?;
        if !(self.repulsion_strength.is_finite() && self.repulsion_strength >= 0.0) {
            return Err(FieldConfigError::NotPositive { name: "repulsion_strength", value: self.repulsion_strength });
        }
        if !(self.wrap_margin.is_finite() && self.wrap_margin >= 0.0) {
            return Err(FieldConfigError::NotPositive { name: "wrap_margin", value: self.wrap_margin });
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(FieldConfigError::Damping(self.damping));
        }
        non_empty("radius", self.radius_range)?;
        non_empty("opacity", self.opacity_range)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), FieldConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldConfigError::NotPositive { name, value })
    }
}

fn non_empty(name: &'static str, (min, max): (f64, f64)) -> Result<(), FieldConfigError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(FieldConfigError::EmptyRange { name, min, max })
    }
}
