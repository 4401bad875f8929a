//! Window-level pointer capture for ruler drags.
//!
//! While a drag is active, `mousemove` and `mouseup` are observed on the
//! window so the gesture survives the pointer leaving the ruler, and
//! `selectstart` is cancelled so dragging does not select page text.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use scrubline_core::{PointerCapture, TimelineController};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, MouseEvent, Performance, Window};

use crate::widget::Shared;

type Listener = Closure<dyn FnMut(Event)>;

pub(crate) struct WindowCapture {
    shared: Weak<Shared>,
    /// Listeners removed by a released guard. The `mouseup` closure releases
    /// its own guard, so closures are parked here and freed on the next
    /// capture instead of while one of them is still running.
    retired: Rc<RefCell<Vec<Listener>>>,
}

impl WindowCapture {
    pub(crate) fn new(shared: Weak<Shared>) -> Self {
        Self {
            shared,
            retired: Rc::default(),
        }
    }
}

impl PointerCapture for WindowCapture {
    type Guard = WindowListeners;

    fn capture(&mut self) -> WindowListeners {
        self.retired.borrow_mut().clear();

        let mut guard = WindowListeners {
            window: web_sys::window(),
            listeners: Vec::new(),
            retired: Rc::clone(&self.retired),
        };
        let Some(window) = guard.window.clone() else {
            log::warn!("no window; drag only follows events delivered by the host");
            return guard;
        };

        let shared = self.shared.clone();
        guard.listen(&window, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Some(shared) = shared.upgrade() {
                shared.dispatch(|tl| tl.pointer_move(i64::from(mouse.client_x()), now_ms()));
            }
        });

        let shared = self.shared.clone();
        guard.listen(&window, "mouseup", move |_event| {
            if let Some(shared) = shared.upgrade() {
                shared.dispatch(TimelineController::pointer_up);
            }
        });

        guard.listen(&window, "selectstart", |event| event.prevent_default());

        guard
    }
}

/// Window listeners attached for one drag; removed on drop.
pub struct WindowListeners {
    window: Option<Window>,
    listeners: Vec<(&'static str, Listener)>,
    retired: Rc<RefCell<Vec<Listener>>>,
}

impl WindowListeners {
    fn listen(&mut self, window: &Window, kind: &'static str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.listeners.push((kind, closure)),
            Err(err) => log::warn!("failed to add window {kind} listener: {err:?}"),
        }
    }
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let mut retired = self.retired.borrow_mut();
        for (kind, closure) in self.listeners.drain(..) {
            if let Err(err) =
                window.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove window {kind} listener: {err:?}");
            }
            retired.push(closure);
        }
    }
}

/// `performance.now()`, or 0 outside a browser.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .as_ref()
        .map_or(0.0, Performance::now)
}
