pub mod ruler;
pub mod segments;

/// Visual scale shared by the ruler and the keyframe grid.
pub const PX_PER_MS: i64 = 1;

/// Width in px of a strip that represents `duration` ms.
///
/// Both the ruler bar and every keyframe segment are sized through this, so
/// they can never disagree.
pub fn content_width(duration: i64) -> i64 {
    duration * PX_PER_MS
}
