//! Shared numeric constants for the backdrop crate.

// ── Particle field ──────────────────────────────────────────────

/// Number of particles created at mount.
pub const PARTICLE_COUNT: usize = 70;

/// Maximum distance at which two particles are linked by a line.
pub const CONNECTION_DISTANCE: f64 = 130.0;

/// Distance within which the pointer pushes particles away.
pub const REPULSION_RADIUS: f64 = 160.0;

/// Velocity impulse applied at the pointer's position, scaled down linearly to
/// zero at [`REPULSION_RADIUS`].
pub const REPULSION_STRENGTH: f64 = 0.03;

/// Per-frame multiplicative velocity decay.
pub const DAMPING: f64 = 0.998;

/// Speed below which a particle receives random jitter.
pub const MIN_SPEED: f64 = 0.1;

/// Total width of the jitter interval added to each velocity component.
pub const JITTER: f64 = 0.1;

/// Distance past each viewport edge before a particle wraps to the other side.
pub const WRAP_MARGIN: f64 = 10.0;

/// Total width of the initial velocity interval, centred on zero.
pub const INITIAL_SPEED_SPAN: f64 = 0.4;

/// Radius range for newly spawned particles.
pub const RADIUS_MIN: f64 = 0.5;
pub const RADIUS_MAX: f64 = 2.5;

/// Opacity range for newly spawned particles.
pub const OPACITY_MIN: f64 = 0.1;
pub const OPACITY_MAX: f64 = 0.6;

/// Line alpha for two coincident particles.
pub const LINE_ALPHA_MAX: f64 = 0.12;

/// Connection line width in CSS pixels.
pub const LINE_WIDTH: f64 = 0.6;

// ── Pointer ─────────────────────────────────────────────────────

/// Pointer position used while the pointer is outside the viewport.
pub const POINTER_OFFSCREEN: f64 = -1000.0;

// ── Ripples ─────────────────────────────────────────────────────

/// How long a ripple stays alive after the click, in milliseconds.
pub const RIPPLE_LIFETIME_MS: f64 = 1200.0;

/// Duration of the visible expansion, in milliseconds.
pub const RIPPLE_EXPAND_MS: f64 = 1000.0;

/// Ring radius at scale 1.0.
pub const RIPPLE_BASE_RADIUS: f64 = 30.0;

/// Ring scale at the end of the expansion.
pub const RIPPLE_MAX_SCALE: f64 = 4.0;

/// Ring opacity at the moment of the click.
pub const RIPPLE_START_ALPHA: f64 = 0.5;

/// Ring stroke width in CSS pixels.
pub const RIPPLE_LINE_WIDTH: f64 = 1.0;
