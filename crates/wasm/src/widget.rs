use std::cell::RefCell;
use std::rc::Rc;

use scrubline_core::{FieldEvent, FieldInput, RulerGeometry, TimelineConfig, TimelineController};
use scrubline_protocol::{Bounds, PanelId, SyncGroupId};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::capture::{WindowCapture, now_ms};
use crate::error::BridgeError;
use crate::names::{ms, parse_axis, parse_field, parse_key, px};

type Controller = TimelineController<WindowCapture>;

/// State shared between the JS-facing widget and its window listeners.
pub(crate) struct Shared {
    controller: RefCell<Controller>,
    on_change: RefCell<Option<js_sys::Function>>,
}

impl Shared {
    /// Run `f` against the controller and notify the host if it reports a
    /// change. Used by window listeners, which have no caller to return to.
    pub(crate) fn dispatch(&self, f: impl FnOnce(&mut Controller) -> bool) {
        let changed = match self.controller.try_borrow_mut() {
            Ok(mut tl) => f(&mut tl),
            Err(_) => {
                log::warn!("dropping window event: timeline is busy");
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Result<R, BridgeError> {
        let mut tl = self
            .controller
            .try_borrow_mut()
            .map_err(|_| BridgeError::Busy)?;
        Ok(f(&mut tl))
    }

    /// Call the host's change callback. The controller must not be borrowed,
    /// since the callback usually reads the new presentation.
    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback
            && let Err(err) = callback.call0(&JsValue::NULL)
        {
            log::warn!("change callback threw: {err:?}");
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(value)?)
}

/// The timeline widget's interaction state, driven by DOM events the host
/// forwards and read back as JSON.
///
/// Numbers cross the boundary as CSS pixels / milliseconds and are rounded to
/// integers. Every method that returns JSON returns the serialized form of
/// the matching `scrubline-core` / `scrubline-protocol` type.
#[wasm_bindgen]
pub struct TimelineWidget {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl TimelineWidget {
    /// Create a widget from an optional JSON `TimelineConfig`. Missing keys
    /// take their defaults; an inconsistent config is rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TimelineWidget, JsError> {
        let config = match config_json.as_deref() {
            Some(json) => TimelineConfig::from_json(json).map_err(BridgeError::from)?,
            None => TimelineConfig::default(),
        };
        log::debug!("timeline widget created with {config:?}");

        let shared = Rc::new_cyclic(|weak| Shared {
            controller: RefCell::new(TimelineController::with_capture(
                config,
                WindowCapture::new(weak.clone()),
            )),
            on_change: RefCell::new(None),
        });
        Ok(TimelineWidget { shared })
    }

    /// Register the function called after window-level drag events change
    /// the timeline. Pass `undefined` to clear it.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Option<js_sys::Function>) {
        *self.shared.on_change.borrow_mut() = callback;
    }

    pub fn time(&self) -> Result<f64, JsError> {
        Ok(ms(self.shared.with(|tl| tl.time())?))
    }

    pub fn duration(&self) -> Result<f64, JsError> {
        Ok(ms(self.shared.with(|tl| tl.duration())?))
    }

    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&self, time: f64) -> Result<f64, JsError> {
        Ok(ms(self.shared.with(|tl| tl.set_time(px(time)))?))
    }

    #[wasm_bindgen(js_name = setDuration)]
    pub fn set_duration(&self, duration: f64) -> Result<f64, JsError> {
        Ok(ms(self.shared.with(|tl| tl.set_duration(px(duration)))?))
    }

    /// Measured ruler geometry: the scroll container's visible left/right
    /// edges and the track's left edge, all from `getBoundingClientRect()`,
    /// taken while the container was scrolled by `scroll_left`.
    #[wasm_bindgen(js_name = setRulerGeometry)]
    pub fn set_ruler_geometry(
        &self,
        container_left: f64,
        container_right: f64,
        track_left: f64,
        scroll_left: f64,
    ) -> Result<(), JsError> {
        let geometry = RulerGeometry::from_measured(
            Bounds::new(px(container_left), px(container_right)),
            px(track_left),
            px(scroll_left),
        );
        Ok(self.shared.with(|tl| tl.set_ruler_geometry(geometry))?)
    }

    /// `mousedown` on the ruler track. Window-level move/up listeners stay
    /// attached until the drag ends.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, client_x: f64) -> Result<(), JsError> {
        Ok(self
            .shared
            .with(|tl| tl.pointer_down(px(client_x), now_ms()))?)
    }

    /// End a drag whose `mouseup` was lost once it has been idle for the
    /// configured timeout. Returns `true` if a drag was ended.
    pub fn tick(&self) -> Result<bool, JsError> {
        Ok(self.shared.with(|tl| tl.tick(now_ms()))?)
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> Result<bool, JsError> {
        Ok(self.shared.with(|tl| tl.is_dragging())?)
    }

    /// A `scroll` event from `panel`. Returns JSON `ScrollUpdate[]`: the
    /// offsets to assign to the panel's partners.
    ///
    /// After assigning an update, the host may report the partner's
    /// `scrollLeft` / `scrollTop` read back from the element. A partner at
    /// its scroll limit fires no event of its own, and the read-back value
    /// keeps the group converged.
    #[wasm_bindgen(js_name = panelScroll)]
    pub fn panel_scroll(&self, panel: &str, axis: &str, offset: f64) -> Result<String, JsError> {
        let axis = parse_axis(axis)?;
        let panel = PanelId::new(panel);
        let updates = self
            .shared
            .with(|tl| tl.on_panel_scroll(&panel, axis, px(offset)))?;
        Ok(to_json(&updates)?)
    }

    /// Add a scroll container beyond the built-in ruler, keyframe list and
    /// track list.
    #[wasm_bindgen(js_name = registerPanel)]
    pub fn register_panel(&self, panel: &str, group: &str, axis: &str) -> Result<(), JsError> {
        let axis = parse_axis(axis)?;
        Ok(self
            .shared
            .with(|tl| tl.register_panel(PanelId::new(panel), SyncGroupId::new(group), axis))?)
    }

    #[wasm_bindgen(js_name = fieldFocus)]
    pub fn field_focus(&self, field: &str) -> Result<String, JsError> {
        self.field_input(field, FieldInput::Focus)
    }

    /// The input's full text after a keystroke.
    #[wasm_bindgen(js_name = fieldEdit)]
    pub fn field_edit(&self, field: &str, text: String) -> Result<String, JsError> {
        self.field_input(field, FieldInput::Edit(text))
    }

    #[wasm_bindgen(js_name = fieldKey)]
    pub fn field_key(&self, field: &str, key: &str) -> Result<String, JsError> {
        let key = parse_key(key)?;
        self.field_input(field, FieldInput::Key(key))
    }

    #[wasm_bindgen(js_name = fieldBlur)]
    pub fn field_blur(&self, field: &str) -> Result<String, JsError> {
        self.field_input(field, FieldInput::Blur)
    }

    /// JSON `FieldView` for rendering the `<input>`.
    #[wasm_bindgen(js_name = fieldView)]
    pub fn field_view(&self, field: &str) -> Result<String, JsError> {
        let field = parse_field(field)?;
        let view = self.shared.with(|tl| tl.field_view(field))?;
        Ok(to_json(&view)?)
    }

    /// JSON `Presentation`: everything the view needs after a state change.
    pub fn presentation(&self) -> Result<String, JsError> {
        let presentation = self.shared.with(|tl| tl.presentation())?;
        Ok(to_json(&presentation)?)
    }

    /// JSON `RenderCommand[]` for the ruler's visible window.
    #[wasm_bindgen(js_name = renderRuler)]
    pub fn render_ruler(&self) -> Result<String, JsError> {
        let commands = self.shared.with(|tl| tl.render_ruler())?;
        Ok(to_json(&commands)?)
    }

    /// JSON `RenderCommand[]` for `rows` keyframe segments.
    #[wasm_bindgen(js_name = renderSegments)]
    pub fn render_segments(&self, rows: usize) -> Result<String, JsError> {
        let commands = self.shared.with(|tl| tl.render_segments(rows))?;
        Ok(to_json(&commands)?)
    }
}

impl TimelineWidget {
    /// Returns the JSON `FieldEvent`.
    fn field_input(&self, field: &str, input: FieldInput) -> Result<String, JsError> {
        let field = parse_field(field)?;
        let event: FieldEvent = self.shared.with(|tl| tl.field_input(field, input))?;
        Ok(to_json(&event)?)
    }
}
