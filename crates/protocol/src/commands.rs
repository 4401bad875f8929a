use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for the ruler and keyframe grid.
/// View layers consume this list in order; each command carries all the data
/// it needs. Coordinates are in panel content space (1 px per ms), before
/// the panel's scroll offset is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle.
    DrawRect { rect: Rect, color: ThemeToken },

    /// Draw a text string, left-aligned at `position`.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (e.g. one keyframe segment row).
    BeginGroup { id: String },

    /// End the current group.
    EndGroup,
}
