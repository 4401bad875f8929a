//! Pointer drag over the ruler track.
//!
//! A drag starts with a pointer-down on the track and keeps reporting
//! track-relative offsets for every pointer move until pointer-up, even when
//! the pointer leaves the track element. Offsets are clamped to the part of
//! the track that is actually visible inside its scroll container.

use scrubline_protocol::Bounds;

/// Window-level pointer capture held for the lifetime of a drag.
///
/// `capture` subscribes to pointer move/up events outside the track element
/// and suppresses native text selection. The returned guard undoes both when
/// dropped, so ending the session is the only release path.
pub trait PointerCapture {
    type Guard;

    fn capture(&mut self) -> Self::Guard;
}

/// Capture for hosts that route every pointer event to the controller
/// themselves (tests, native shells).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    type Guard = ();

    fn capture(&mut self) -> Self::Guard {}
}

/// State of one in-progress drag. Exists only between pointer-down and
/// pointer-up.
#[derive(Debug)]
pub struct DragSession<G> {
    /// Track bounds in screen coordinates at drag start.
    track: Bounds,
    /// Scroll container bounds in screen coordinates.
    container: Bounds,
    /// Container scroll offset at drag start.
    scroll_at_start: i64,
    last_offset: i64,
    last_move_ms: f64,
    _capture: G,
}

impl<G> DragSession<G> {
    /// Track bounds after the container scrolled by `scroll - scroll_at_start`.
    fn track_at(&self, scroll: i64) -> Bounds {
        self.track.shifted(self.scroll_at_start - scroll)
    }

    /// The visible sub-extent of the track: its bounds clipped to the scroll
    /// container, not the full scrollable width.
    pub fn visible_bounds(&self, scroll: i64) -> Bounds {
        self.track_at(scroll).intersect(&self.container)
    }

    /// Map a screen x to a track-relative offset, pinning pointers outside
    /// the visible window to its nearest edge.
    pub fn offset_for(&self, pointer_x: i64, scroll: i64) -> i64 {
        let track = self.track_at(scroll);
        let visible = track.intersect(&self.container);
        visible.clamp(pointer_x) - track.left
    }

    pub fn last_offset(&self) -> i64 {
        self.last_offset
    }
}

pub struct DragController<C: PointerCapture> {
    capture: C,
    session: Option<DragSession<C::Guard>>,
}

impl<C: PointerCapture> std::fmt::Debug for DragController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("active", &self.is_active())
            .field("last_offset", &self.session.as_ref().map(|s| s.last_offset))
            .finish()
    }
}

impl<C: PointerCapture + Default> Default for DragController<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C: PointerCapture> DragController<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<C::Guard>> {
        self.session.as_ref()
    }

    /// Start a drag at `pointer_x` and return the initial track offset.
    ///
    /// A session that never saw its pointer-up is released first, so a lost
    /// mouseup cannot leave two sets of window listeners attached.
    pub fn begin(
        &mut self,
        pointer_x: i64,
        track: Bounds,
        container: Bounds,
        scroll: i64,
        now_ms: f64,
    ) -> i64 {
        if let Some(stale) = self.session.take() {
            log::warn!(
                "drag started while a previous session was still active (last offset {}); releasing it",
                stale.last_offset
            );
            drop(stale);
        }

        let guard = self.capture.capture();
        let mut session = DragSession {
            track,
            container,
            scroll_at_start: scroll,
            last_offset: 0,
            last_move_ms: now_ms,
            _capture: guard,
        };
        let offset = session.offset_for(pointer_x, scroll);
        session.last_offset = offset;
        log::debug!(
            "drag begin at x={pointer_x} offset={offset} visible={:?}",
            session.visible_bounds(scroll)
        );
        self.session = Some(session);
        offset
    }

    /// Report a pointer move. Returns the new track offset, or `None` when no
    /// drag is active.
    pub fn on_pointer_move(&mut self, pointer_x: i64, scroll: i64, now_ms: f64) -> Option<i64> {
        let session = self.session.as_mut()?;
        let offset = session.offset_for(pointer_x, scroll);
        session.last_offset = offset;
        session.last_move_ms = now_ms;
        log::trace!("drag move x={pointer_x} offset={offset}");
        Some(offset)
    }

    /// End the drag and release the capture. Returns `false` when there was
    /// nothing to end.
    pub fn end(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("drag end at offset {}", session.last_offset);
                true
            }
            None => false,
        }
    }

    /// Whether the active drag has seen no pointer movement for longer than
    /// `timeout_ms`.
    pub fn is_idle(&self, now_ms: f64, timeout_ms: f64) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| now_ms - s.last_move_ms > timeout_ms)
    }
}
