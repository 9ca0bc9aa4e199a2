//! Mount lifecycle: the seam between the backdrop and whatever drives it.
//!
//! DESIGN
//! ======
//! [`Host`] abstracts the platform: a drawing surface, a frame clock and event
//! listeners. [`Mount`] acquires those on mount, runs one frame per frame
//! callback, and releases them on unmount. Frame callbacks are serialized by
//! the host; a mount never requests a second frame while one is pending.
//!
//! A host that cannot provide a surface yields [`MountError::NoSurface`], which
//! the browser entry point turns into a silent no-op.

#[cfg(test)]
#[path = "mount_test.rs"]
mod mount_test;

use rand::Rng;

use crate::config::{FieldConfig, FieldConfigError};
use crate::field::FieldCore;
use crate::geom::Point;
use crate::geom::Viewport;
use crate::input::EventKind;
use crate::render::Surface;
use crate::ripple::RippleLayer;

/// Handle returned by [`Host::request_frame`].
pub type FrameId = i32;

/// Handle returned by [`Host::listen`].
pub type ListenerId = usize;

/// Platform services a mounted backdrop depends on.
pub trait Host {
    type Surface: Surface;

    /// Obtain the drawing surface, or `None` if the platform has none.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Size the backing store of the surface to `viewport`.
    fn resize_surface(&mut self, viewport: Viewport);

    /// Schedule one frame callback. `None` if scheduling failed.
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Cancel a scheduled frame callback.
    fn cancel_frame(&mut self, frame: FrameId);

    /// Attach the listener for `event`. `None` if attaching failed.
    fn listen(&mut self, event: EventKind) -> Option<ListenerId>;

    /// Detach a listener.
    fn unlisten(&mut self, listener: ListenerId);
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MountError {
    #[error("no drawing surface available")]
    NoSurface,
    #[error("invalid field config: {0}")]
    Config(#[from] FieldConfigError),
}

/// A backdrop attached to a host.
pub struct Mount<H: Host, R: Rng> {
    host: H,
    surface: H::Surface,
    field: FieldCore,
    ripples: RippleLayer,
    rng: R,
    pending_frame: Option<FrameId>,
    listeners: Vec<ListenerId>,
    mounted: bool,
}

impl<H: Host, R: Rng> Mount<H, R> {
    /// Acquire the surface, size it, populate the field, attach listeners and
    /// schedule the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::NoSurface`] when the host has no surface, or
    /// [`MountError::Config`] when `config` fails validation. Nothing is
    /// attached in either case.
    pub fn mount(mut host: H, config: FieldConfig, mut rng: R) -> Result<Self, MountError> {
        config.validate()?;
        let surface = host.acquire_surface().ok_or(MountError::NoSurface)?;

        let viewport = host.viewport();
        host.resize_surface(viewport);
        let field = FieldCore::new(config, viewport, &mut rng)?;

        let listeners = EventKind::ALL
            .iter()
            .filter_map(|&event| host.listen(event))
            .collect();
        let pending_frame = host.request_frame();

        Ok(Self {
            host,
            surface,
            field,
            ripples: RippleLayer::new(),
            rng,
            pending_frame,
            listeners,
            mounted: true,
        })
    }

    /// Frame callback: draw one frame and schedule the next. A no-op after
    /// unmount.
    ///
    /// # Errors
    ///
    /// Returns the surface's error. No further frame is scheduled in that case.
    pub fn on_frame(&mut self, now_ms: f64) -> Result<(), <H::Surface as Surface>::Error> {
        if !self.mounted {
            return Ok(());
        }
        self.pending_frame = None;

        self.field.frame(&mut self.surface, &mut self.rng)?;
        self.ripples.expire(now_ms);
        self.ripples.draw(&mut self.surface, now_ms)?;

        self.pending_frame = self.host.request_frame();
        Ok(())
    }

    pub fn on_resize(&mut self) {
        if !self.mounted {
            return;
        }
        let viewport = self.host.viewport();
        self.host.resize_surface(viewport);
        self.field.resize(viewport);
    }

    pub fn on_pointer_move(&mut self, p: Point) {
        if self.mounted {
            self.field.pointer_move(p);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if self.mounted {
            self.field.pointer_leave();
        }
    }

    pub fn on_click(&mut self, p: Point, now_ms: f64) {
        if self.mounted {
            self.ripples.spawn(p, now_ms);
        }
    }

    /// Cancel the pending frame and detach every listener. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(frame) = self.pending_frame.take() {
            self.host.cancel_frame(frame);
        }
        for listener in self.listeners.drain(..) {
            self.host.unlisten(listener);
        }
        self.mounted = false;
    }

    // --- Queries ---

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    #[must_use]
    pub fn field(&self) -> &FieldCore {
        &self.field
    }

    #[must_use]
    pub fn ripples(&self) -> &RippleLayer {
        &self.ripples
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }
}
