use scrubline_protocol::{
    Axis, Bounds, PanelId, Presentation, RenderCommand, ScrollUpdate, SyncGroupId,
};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::drag::{DragController, NoCapture, PointerCapture};
use crate::input::{FieldEvent, FieldInput, FieldView, NumericField};
use crate::panels;
use crate::quantize::{quantize, quantize_value};
use crate::scroll_sync::ScrollSynchronizer;
use crate::views::{content_width, ruler, segments};

/// The two numeric inputs of the play controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Time,
    Duration,
}

/// The single source of truth for the timeline.
///
/// Invariants: `min_duration <= duration <= max_duration` and
/// `0 <= time <= duration`. Only [`TimelineController`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineState {
    time: i64,
    duration: i64,
}

impl TimelineState {
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }
}

/// Screen geometry of the ruler as measured by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerGeometry {
    /// Visible extent of the ruler's scroll container.
    pub container: Bounds,
    /// Screen x of the track's left edge when the container is scrolled to 0.
    pub track_origin: i64,
}

impl RulerGeometry {
    /// Build from a `getBoundingClientRect()` of the track taken while the
    /// container was scrolled by `scroll`.
    pub fn from_measured(container: Bounds, track_left: i64, scroll: i64) -> Self {
        Self {
            container,
            track_origin: track_left + scroll,
        }
    }

    /// Screen x of the track's left edge at `scroll`.
    pub fn track_left(&self, scroll: i64) -> i64 {
        self.track_origin - scroll
    }
}

/// Orchestrates ruler drags, scroll sync and the numeric inputs around one
/// [`TimelineState`].
///
/// Everything the view shows (playhead offset and visibility, ruler and
/// segment widths) is computed on demand from the state and the ruler's
/// scroll offset; none of it is stored.
pub struct TimelineController<C: PointerCapture = NoCapture> {
    config: TimelineConfig,
    state: TimelineState,
    drag: DragController<C>,
    sync: ScrollSynchronizer,
    geometry: RulerGeometry,
    ruler_panel: PanelId,
    /// Unquantized track offset under the pointer during a ruler gesture.
    /// Lets the playhead follow the pointer 1:1 while `time` snaps to the
    /// step grid.
    scrub_offset: Option<i64>,
    time_field: NumericField,
    duration_field: NumericField,
}

impl<C: PointerCapture> std::fmt::Debug for TimelineController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineController")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("sync", &self.sync)
            .field("geometry", &self.geometry)
            .field("scrub_offset", &self.scrub_offset)
            .finish_non_exhaustive()
    }
}

impl TimelineController<NoCapture> {
    pub fn new(config: TimelineConfig) -> Self {
        Self::with_capture(config, NoCapture)
    }
}

impl Default for TimelineController<NoCapture> {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl<C: PointerCapture> TimelineController<C> {
    /// Create a controller whose drags acquire window-level pointer capture
    /// through `capture`.
    ///
    /// Out-of-range initial values in `config` are clamped rather than
    /// rejected; use [`TimelineConfig::validate`] to catch them up front.
    pub fn with_capture(config: TimelineConfig, capture: C) -> Self {
        let duration = quantize_value(
            config.initial_duration,
            config.min_duration,
            config.max_duration,
            config.step,
        );
        let time = quantize_value(config.initial_time, 0, duration, config.step);

        let mut sync = ScrollSynchronizer::new();
        panels::register_default(&mut sync);

        Self {
            state: TimelineState { time, duration },
            drag: DragController::new(capture),
            sync,
            geometry: RulerGeometry {
                container: Bounds::new(0, config.viewport_width),
                track_origin: 0,
            },
            ruler_panel: panels::ruler(),
            scrub_offset: None,
            time_field: NumericField::new(time, 0, duration, config.step),
            duration_field: NumericField::new(
                duration,
                config.min_duration,
                config.max_duration,
                config.step,
            ),
            config,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn time(&self) -> i64 {
        self.state.time
    }

    pub fn duration(&self) -> i64 {
        self.state.duration
    }

    pub fn geometry(&self) -> RulerGeometry {
        self.geometry
    }

    pub fn set_ruler_geometry(&mut self, geometry: RulerGeometry) {
        self.geometry = geometry;
    }

    pub fn scroll_sync(&self) -> &ScrollSynchronizer {
        &self.sync
    }

    /// Add a panel beyond the default ruler / keyframe list / track list.
    pub fn register_panel(&mut self, panel: PanelId, group: SyncGroupId, axis: Axis) {
        self.sync.register(panel, group, axis);
    }

    // --- State setters -------------------------------------------------------

    /// Quantize `candidate` into the duration range and commit it. Pulls
    /// `time` down with it if the new duration is shorter.
    pub fn set_duration(&mut self, candidate: i64) -> i64 {
        let duration = quantize_value(
            candidate,
            self.config.min_duration,
            self.config.max_duration,
            self.config.step,
        );
        self.state.duration = duration;
        if let Some(offset) = self.scrub_offset {
            self.scrub_offset = Some(offset.min(content_width(duration)));
        }
        if self.state.time > duration {
            log::debug!("duration {duration} below time {}; clamping time", self.state.time);
            self.state.time = duration;
        }
        self.sync_fields();
        log::debug!("duration = {duration}");
        duration
    }

    /// Quantize `candidate` into `[0, duration]` and commit it. The playhead
    /// moves to the new time even if a ruler drag is in progress.
    pub fn set_time(&mut self, candidate: i64) -> i64 {
        self.scrub_offset = None;
        self.apply_time(candidate)
    }

    fn apply_time(&mut self, candidate: i64) -> i64 {
        let time = quantize_value(candidate, 0, self.state.duration, self.config.step);
        self.state.time = time;
        self.sync_fields();
        time
    }

    /// Commit raw text for `time`. Unparseable text keeps the current value.
    pub fn commit_time_text(&mut self, raw: &str) -> i64 {
        match quantize(raw, 0, self.state.duration, self.config.step) {
            Ok(time) => self.set_time(time),
            Err(err) => {
                log::debug!("{err}; keeping time {}", self.state.time);
                self.state.time
            }
        }
    }

    /// Commit raw text for `duration`. Unparseable text keeps the current
    /// value.
    pub fn commit_duration_text(&mut self, raw: &str) -> i64 {
        match quantize(
            raw,
            self.config.min_duration,
            self.config.max_duration,
            self.config.step,
        ) {
            Ok(duration) => self.set_duration(duration),
            Err(err) => {
                log::debug!("{err}; keeping duration {}", self.state.duration);
                self.state.duration
            }
        }
    }

    fn sync_fields(&mut self) {
        self.duration_field.set_committed(self.state.duration);
        self.time_field.set_range(0, self.state.duration);
        self.time_field.set_committed(self.state.time);
    }

    // --- Numeric inputs ------------------------------------------------------

    /// Feed one input event to a play-control field. Commits are applied to
    /// the timeline state before returning.
    pub fn field_input(&mut self, field: Field, input: FieldInput) -> FieldEvent {
        let event = match field {
            Field::Time => self.time_field.apply(input),
            Field::Duration => self.duration_field.apply(input),
        };
        if let FieldEvent::Committed(value) = event {
            match field {
                Field::Time => {
                    self.set_time(value);
                }
                Field::Duration => {
                    self.set_duration(value);
                }
            }
        }
        event
    }

    pub fn field_view(&self, field: Field) -> FieldView {
        match field {
            Field::Time => self.time_field.view(),
            Field::Duration => self.duration_field.view(),
        }
    }

    // --- Ruler gestures ------------------------------------------------------

    /// A press on the ruler track at track-relative `offset`.
    pub fn on_ruler_pointer_down(&mut self, offset: i64) {
        self.scrub_to(offset);
    }

    /// Pointer moved during a ruler drag. `time` follows on the step grid, so
    /// it may trail the pixel-exact playhead by up to half a step.
    pub fn on_ruler_dragging(&mut self, offset: i64) {
        self.scrub_to(offset);
    }

    /// The ruler gesture ended; the playhead snaps to the committed `time`.
    pub fn on_ruler_drag_end(&mut self) {
        self.scrub_offset = None;
    }

    fn scrub_to(&mut self, offset: i64) {
        let offset = offset.clamp(0, content_width(self.state.duration));
        self.scrub_offset = Some(offset);
        let time = self.apply_time(offset);
        log::trace!("scrub offset={offset} time={time}");
    }

    /// Pointer-down on the ruler track at screen x `pointer_x`.
    pub fn pointer_down(&mut self, pointer_x: i64, now_ms: f64) {
        let scroll = self.ruler_scroll();
        let left = self.geometry.track_left(scroll);
        let track = Bounds::new(left, left + content_width(self.state.duration));
        let offset = self
            .drag
            .begin(pointer_x, track, self.geometry.container, scroll, now_ms);
        self.on_ruler_pointer_down(offset);
    }

    /// Window-level pointer move. Returns `false` when no drag is active.
    pub fn pointer_move(&mut self, pointer_x: i64, now_ms: f64) -> bool {
        let scroll = self.ruler_scroll();
        match self.drag.on_pointer_move(pointer_x, scroll, now_ms) {
            Some(offset) => {
                self.on_ruler_dragging(offset);
                true
            }
            None => false,
        }
    }

    /// Window-level pointer release. Returns `false` when no drag was active.
    pub fn pointer_up(&mut self) -> bool {
        if self.drag.end() {
            self.on_ruler_drag_end();
            true
        } else {
            false
        }
    }

    /// Periodic check for drags whose pointer-up was lost (released outside
    /// the browser window). Only active when `drag_idle_timeout_ms` is set.
    /// Returns `true` if a drag was ended.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(timeout) = self.config.drag_idle_timeout_ms else {
            return false;
        };
        if self.drag.is_idle(now_ms, timeout) {
            log::debug!("no pointer movement for {timeout}ms; ending drag");
            self.pointer_up()
        } else {
            false
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // --- Scrolling -----------------------------------------------------------

    /// A genuine scroll on the ruler. Returns the offsets to mirror onto its
    /// sync partners.
    pub fn on_ruler_scroll(&mut self, offset: i64) -> Vec<ScrollUpdate> {
        let ruler = self.ruler_panel.clone();
        self.on_panel_scroll(&ruler, Axis::Horizontal, offset)
    }

    /// A scroll signal from any registered panel.
    pub fn on_panel_scroll(&mut self, panel: &PanelId, axis: Axis, offset: i64) -> Vec<ScrollUpdate> {
        let before = self.ruler_scroll();
        let updates = self.sync.on_scroll(panel, axis, offset);
        if self.ruler_scroll() != before {
            log::trace!(
                "ruler scroll {before} -> {}; playhead at {} (hidden: {})",
                self.ruler_scroll(),
                self.playhead_offset(),
                self.playhead_hidden()
            );
        }
        updates
    }

    pub fn ruler_scroll(&self) -> i64 {
        self.sync
            .offset(&self.ruler_panel, Axis::Horizontal)
            .unwrap_or(0)
    }

    // --- Derived presentation ------------------------------------------------

    /// Content x of the playhead: the pointer during a gesture, `time`
    /// otherwise.
    fn playhead_position(&self) -> i64 {
        self.scrub_offset.unwrap_or(self.state.time)
    }

    /// Playhead x inside the visible ruler viewport.
    pub fn playhead_offset(&self) -> i64 {
        self.playhead_position() - self.ruler_scroll()
    }

    /// Whether the playhead's screen position falls outside the ruler's
    /// scroll container.
    pub fn playhead_hidden(&self) -> bool {
        let screen_x = self.playhead_position() + self.geometry.track_left(self.ruler_scroll());
        !self.geometry.container.contains(screen_x)
    }

    pub fn presentation(&self) -> Presentation {
        let width = content_width(self.state.duration);
        Presentation {
            time: self.state.time,
            duration: self.state.duration,
            playhead_offset: self.playhead_offset(),
            playhead_hidden: self.playhead_hidden(),
            ruler_width: width,
            segment_width: width,
            scroll: self.sync.snapshot(),
        }
    }

    /// The part of the ruler track, in content x, shown inside the
    /// container. Uses the same geometry as [`Self::playhead_hidden`].
    fn ruler_window(&self) -> Bounds {
        let left = self.geometry.container.left - self.geometry.track_left(self.ruler_scroll());
        Bounds::new(left, left + self.geometry.container.width())
    }

    /// Ruler render commands for the currently visible window.
    pub fn render_ruler(&self) -> Vec<RenderCommand> {
        let visible = self.ruler_window();
        let playhead = (!self.playhead_hidden()).then(|| self.playhead_position());
        ruler::render_ruler(self.state.duration, visible, playhead)
    }

    /// Keyframe grid render commands for `rows` segment rows. The grid has no
    /// track padding, so its window starts at its own scroll offset.
    pub fn render_segments(&self, rows: usize) -> Vec<RenderCommand> {
        let scroll = self
            .sync
            .offset(&PanelId::new(panels::KEYFRAME_LIST), Axis::Horizontal)
            .unwrap_or(0);
        let visible = Bounds::new(scroll, scroll + self.geometry.container.width());
        segments::render_segments(self.state.duration, rows, visible)
    }
}
