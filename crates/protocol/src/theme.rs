use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the view layer's stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Ruler
    RulerBar,
    RulerTickMajor,
    RulerTickMinor,
    RulerLabel,

    // Playhead
    Playhead,

    // Keyframe grid
    SegmentBar,
}
