use scrubline_protocol::{Bounds, Point, Rect, RenderCommand, ThemeToken};

use super::content_width;

const RULER_HEIGHT: f64 = 24.0;
const MAJOR_TICK_HEIGHT: f64 = 10.0;
const MINOR_TICK_HEIGHT: f64 = 4.0;
const FONT_SIZE: f64 = 10.0;
const LABEL_Y: f64 = 2.0;
const MINOR_INTERVAL_MS: i64 = 100;
const MAJOR_INTERVAL_MS: i64 = 1000;

/// Render the ruler bar, its ticks and the playhead line.
///
/// Coordinates are ruler content space (x = ms). `visible` is the window of
/// content currently shown by the ruler's scroll container, i.e.
/// `[scroll, scroll + viewport_width]`; ticks outside it are skipped and
/// everything is clipped to it. `playhead` is the content x of the playhead,
/// `None` when it is hidden.
pub fn render_ruler(duration: i64, visible: Bounds, playhead: Option<i64>) -> Vec<RenderCommand> {
    let width = content_width(duration);
    if width <= 0 || visible.width() <= 0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(64);

    commands.push(RenderCommand::SetClip {
        rect: Rect::new(
            visible.left as f64,
            0.0,
            visible.width() as f64,
            RULER_HEIGHT,
        ),
    });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width as f64, RULER_HEIGHT),
        color: ThemeToken::RulerBar,
    });

    let drawn = visible.intersect(&Bounds::new(0, width));
    // First tick at or after the left edge of the drawn range.
    let mut t = (drawn.left + MINOR_INTERVAL_MS - 1).div_euclid(MINOR_INTERVAL_MS) * MINOR_INTERVAL_MS;
    while t <= drawn.right {
        let x = t as f64;
        if t % MAJOR_INTERVAL_MS == 0 {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, RULER_HEIGHT - MAJOR_TICK_HEIGHT),
                to: Point::new(x, RULER_HEIGHT),
                color: ThemeToken::RulerTickMajor,
                width: 1.0,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(x + 3.0, LABEL_Y),
                text: format_time_label(t),
                color: ThemeToken::RulerLabel,
                font_size: FONT_SIZE,
            });
        } else {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, RULER_HEIGHT - MINOR_TICK_HEIGHT),
                to: Point::new(x, RULER_HEIGHT),
                color: ThemeToken::RulerTickMinor,
                width: 0.5,
            });
        }
        t += MINOR_INTERVAL_MS;
    }

    if let Some(x) = playhead {
        let x = x as f64;
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, RULER_HEIGHT),
            color: ThemeToken::Playhead,
            width: 2.0,
        });
    }

    commands.push(RenderCommand::ClearClip);
    commands
}

/// Format a ms timestamp as a tick label.
fn format_time_label(ms: i64) -> String {
    if ms == 0 {
        "0".to_owned()
    } else if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}
