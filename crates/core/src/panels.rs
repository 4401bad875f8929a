//! Well-known panel and sync group names of the timeline layout.
//!
//! ```text
//!   ┌──────────────┬──────────────────────────────┐
//!   │ play controls│ ruler            ◀── x ──▶   │
//!   ├──────────────┼──────────────────────────────┤
//!   │ track list   │ keyframe list    ◀── x ──▶   │
//!   │     ▲        │      ▲                       │
//!   │     └── y ───┼──────┘                       │
//!   └──────────────┴──────────────────────────────┘
//! ```

use scrubline_protocol::{Axis, PanelId, SyncGroupId};

use crate::scroll_sync::ScrollSynchronizer;

pub const RULER: &str = "ruler";
pub const KEYFRAME_LIST: &str = "keyframe-list";
pub const TRACK_LIST: &str = "track-list";

/// Ruler and keyframe list scroll together horizontally.
pub const HORIZONTAL_GROUP: &str = "timeline-x";
/// Track list and keyframe list scroll together vertically.
pub const VERTICAL_GROUP: &str = "timeline-y";

pub fn ruler() -> PanelId {
    PanelId::new(RULER)
}

/// Register the standard ruler / keyframe list / track list wiring.
pub fn register_default(sync: &mut ScrollSynchronizer) {
    sync.register(
        PanelId::new(RULER),
        SyncGroupId::new(HORIZONTAL_GROUP),
        Axis::Horizontal,
    );
    sync.register(
        PanelId::new(KEYFRAME_LIST),
        SyncGroupId::new(HORIZONTAL_GROUP),
        Axis::Horizontal,
    );
    sync.register(
        PanelId::new(KEYFRAME_LIST),
        SyncGroupId::new(VERTICAL_GROUP),
        Axis::Vertical,
    );
    sync.register(
        PanelId::new(TRACK_LIST),
        SyncGroupId::new(VERTICAL_GROUP),
        Axis::Vertical,
    );
}
