use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// A horizontal extent in screen pixels, as reported by
/// `getBoundingClientRect()` (`left`/`right` only).
///
/// All pointer and layout geometry in the interaction core is
/// one-dimensional: the ruler only scrubs along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i64,
    pub right: i64,
}

impl Bounds {
    pub fn new(left: i64, right: i64) -> Self {
        Self { left, right }
    }

    pub fn width(&self) -> i64 {
        (self.right - self.left).max(0)
    }

    /// Inclusive on both edges.
    pub fn contains(&self, x: i64) -> bool {
        x >= self.left && x <= self.right
    }

    /// The overlapping extent of `self` and `other`.
    ///
    /// When the two do not overlap the result collapses to a zero-width
    /// extent at the nearest edge, so clamping against it stays total.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        if left <= right {
            Bounds { left, right }
        } else {
            Bounds { left, right: left }
        }
    }

    /// Translate both edges by `dx`.
    pub fn shifted(&self, dx: i64) -> Bounds {
        Bounds {
            left: self.left + dx,
            right: self.right + dx,
        }
    }

    pub fn clamp(&self, x: i64) -> i64 {
        x.clamp(self.left, self.right.max(self.left))
    }
}
