//! Browser host: binds a [`Mount`] to a `<canvas>` element, the window's
//! animation-frame clock and DOM listeners.
//!
//! The JavaScript side calls [`mount_backdrop`] once and keeps the returned
//! [`BackdropHandle`] until the page tears the component down.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::geom::{Point, Viewport};
use crate::input::EventKind;
use crate::mount::{FrameId, Host, ListenerId, Mount};

type Slot = Rc<RefCell<Option<Mount<BrowserHost, SmallRng>>>>;

pub struct BrowserHost {
    window: Window,
    canvas: HtmlCanvasElement,
    frame_cb: Closure<dyn FnMut(f64)>,
    handlers: HashMap<EventKind, Closure<dyn FnMut(Event)>>,
    attached: HashMap<ListenerId, (EventTarget, EventKind)>,
    next_listener: ListenerId,
}

impl BrowserHost {
    fn target(&self, event: EventKind) -> Option<EventTarget> {
        if event.on_document() {
            self.window.document().map(Into::into)
        } else {
            Some(self.window.clone().into())
        }
    }
}

impl Host for BrowserHost {
    type Surface = CanvasRenderingContext2d;

    fn acquire_surface(&mut self) -> Option<CanvasRenderingContext2d> {
        match self.canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => Some(ctx),
                Err(_) => None,
            },
            _ => None,
        }
    }

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| match v {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        Viewport::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize_surface(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
    }

    fn request_frame(&mut self) -> Option<FrameId> {
        match self.window.request_animation_frame(self.frame_cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(id),
            Err(_) => None,
        }
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        best_effort(self.window.cancel_animation_frame(frame));
    }

    fn listen(&mut self, event: EventKind) -> Option<ListenerId> {
        let target = self.target(event)?;
        let handler = self.handlers.get(&event)?;
        if target
            .add_event_listener_with_callback(event.dom_name(), handler.as_ref().unchecked_ref())
            .is_err()
        {
            return None;
        }
        self.next_listener += 1;
        self.attached.insert(self.next_listener, (target, event));
        Some(self.next_listener)
    }

    fn unlisten(&mut self, listener: ListenerId) {
        let Some((target, event)) = self.attached.remove(&listener) else {
            return;
        };
        if let Some(handler) = self.handlers.get(&event) {
            let callback = handler.as_ref().unchecked_ref();
            best_effort(target.remove_event_listener_with_callback(event.dom_name(), callback));
        }
    }
}

/// JavaScript-owned handle to a mounted backdrop.
#[wasm_bindgen]
pub struct BackdropHandle {
    slot: Slot,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Stop animating, detach listeners and release the canvas.
    pub fn unmount(&self) {
        let taken = match self.slot.try_borrow_mut() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(mut mount) = taken {
            mount.unmount();
        }
    }
}

/// Mount the backdrop on `canvas`. Returns `undefined` when the canvas has no
/// 2D context; the page simply renders without the backdrop.
#[wasm_bindgen(js_name = mountBackdrop)]
#[must_use]
pub fn mount_backdrop(canvas: HtmlCanvasElement) -> Option<BackdropHandle> {
    let window = web_sys::window()?;
    let slot: Slot = Rc::new(RefCell::new(None));

    let frame_slot = Rc::clone(&slot);
    let frame_cb = Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
        with_mount(&frame_slot, |mount| {
            if mount.on_frame(ts).is_err() {
                mount.unmount();
            }
        });
    });

    let handlers = EventKind::ALL
        .iter()
        .map(|&event| (event, event_handler(&slot, event)))
        .collect();

    let host = BrowserHost {
        window,
        canvas,
        frame_cb,
        handlers,
        attached: HashMap::new(),
        next_listener: 0,
    };

    let rng = SmallRng::seed_from_u64(js_sys::Date::now().to_bits());
    match Mount::mount(host, FieldConfig::default(), rng) {
        Ok(mount) => *slot.borrow_mut() = Some(mount),
        Err(_) => return None,
    }
    Some(BackdropHandle { slot })
}

fn event_handler(slot: &Slot, event: EventKind) -> Closure<dyn FnMut(Event)> {
    let slot = Rc::clone(slot);
    Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        with_mount(&slot, |mount| match event {
            EventKind::Resize => mount.on_resize(),
            EventKind::PointerLeave => mount.on_pointer_leave(),
            EventKind::PointerMove => {
                if let Some(p) = pointer_of(&e) {
                    mount.on_pointer_move(p);
                }
            }
            EventKind::Click => {
                if let Some(p) = pointer_of(&e) {
                    mount.on_click(p, e.time_stamp());
                }
            }
        });
    })
}

/// Detaching from the DOM on unmount is best effort. A frame or event that
/// still fires afterwards goes through [`with_mount`], which finds the slot
/// empty or the mount stopped and does nothing.
fn best_effort(result: Result<(), JsValue>) {
    drop(result);
}

fn pointer_of(e: &Event) -> Option<Point> {
    e.dyn_ref::<MouseEvent>()
        .map(|m| Point::new(f64::from(m.client_x()), f64::from(m.client_y())))
}

/// Run `f` against the mounted backdrop, if any. Re-entrant callbacks are
/// dropped rather than panicking on a double borrow.
fn with_mount(slot: &Slot, f: impl FnOnce(&mut Mount<BrowserHost, SmallRng>)) {
    if let Ok(mut guard) = slot.try_borrow_mut()
        && let Some(mount) = guard.as_mut()
    {
        f(mount);
    }
}
