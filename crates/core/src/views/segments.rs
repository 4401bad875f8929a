use scrubline_protocol::{Bounds, Rect, RenderCommand, ThemeToken};

use super::content_width;

/// Height of one segment row, including its vertical padding.
pub const ROW_HEIGHT: f64 = 40.0;
const BAR_HEIGHT: f64 = 24.0;
const BAR_INSET_Y: f64 = (ROW_HEIGHT - BAR_HEIGHT) / 2.0;

/// Render `rows` keyframe segments, each as wide as the ruler.
///
/// `visible` is the keyframe list's horizontal content window; rows are
/// clipped to it. Vertical culling is left to the view layer.
pub fn render_segments(duration: i64, rows: usize, visible: Bounds) -> Vec<RenderCommand> {
    let width = content_width(duration);
    if width <= 0 || rows == 0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(rows * 3 + 2);
    commands.push(RenderCommand::SetClip {
        rect: Rect::new(
            visible.left as f64,
            0.0,
            visible.width() as f64,
            ROW_HEIGHT * rows as f64,
        ),
    });

    for row in 0..rows {
        let y = row as f64 * ROW_HEIGHT;
        commands.push(RenderCommand::BeginGroup {
            id: format!("segment-{row}"),
        });
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, y + BAR_INSET_Y, width as f64, BAR_HEIGHT),
            color: ThemeToken::SegmentBar,
        });
        commands.push(RenderCommand::EndGroup);
    }

    commands.push(RenderCommand::ClearClip);
    commands
}
