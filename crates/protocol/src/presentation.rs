use std::fmt;

use serde::{Deserialize, Serialize};

/// Scroll axis of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Identifies one scrollable panel (ruler, keyframe list, track list…).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Names a set of panels whose scroll offsets are mirrored on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncGroupId(String);

impl SyncGroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SyncGroupId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// An instruction to the view layer: set `panel`'s scroll position on `axis`
/// to `offset`. Emitted when a sync partner scrolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollUpdate {
    pub panel: PanelId,
    pub axis: Axis,
    pub offset: i64,
}

/// Last known scroll offset of one panel on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelScroll {
    pub panel: PanelId,
    pub axis: Axis,
    pub offset: i64,
}

/// Everything the view layer reads from the interaction core.
///
/// All fields are derived on demand from the controller's state; nothing here
/// is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Committed current time in ms.
    pub time: i64,
    /// Committed duration in ms.
    pub duration: i64,
    /// Playhead x-offset inside the visible ruler viewport, in px.
    pub playhead_offset: i64,
    pub playhead_hidden: bool,
    /// Width of the ruler bar (1 px per ms).
    pub ruler_width: i64,
    /// Width of each keyframe segment (1 px per ms).
    pub segment_width: i64,
    pub scroll: Vec<PanelScroll>,
}
