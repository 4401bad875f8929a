//! Integration tests: drive whole gestures (ruler drags, panel scrolls, field
//! edits) through `TimelineController` and check what the view layer would
//! see.

use proptest::prelude::*;
use scrubline_core::panels::{KEYFRAME_LIST, RULER, TRACK_LIST};
use scrubline_core::{
    Field, FieldEvent, FieldInput, FieldKey, RulerGeometry, TimelineConfig, TimelineController,
    quantize,
};
use scrubline_protocol::{Axis, Bounds, PanelId, RenderCommand, ThemeToken};

/// Ruler container spans x ∈ [300, 1100] on screen; the track starts after
/// 16px of padding.
fn laid_out(duration: i64) -> TimelineController {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tl = TimelineController::default();
    tl.set_ruler_geometry(RulerGeometry::from_measured(Bounds::new(300, 1100), 316, 0));
    tl.set_duration(duration);
    tl
}

fn type_into(tl: &mut TimelineController, field: Field, text: &str) -> FieldEvent {
    tl.field_input(field, FieldInput::Focus);
    tl.field_input(field, FieldInput::Edit(text.to_owned()));
    tl.field_input(field, FieldInput::Key(FieldKey::Enter))
}

/// Apply a scroll signal and deliver the resulting mirror updates back as
/// the browser would (each assignment fires the receiver's scroll event).
fn scroll(tl: &mut TimelineController, panel: &str, axis: Axis, offset: i64) -> usize {
    let updates = tl.on_panel_scroll(&PanelId::new(panel), axis, offset);
    let mirrored = updates.len();
    for update in updates {
        let echo = tl.on_panel_scroll(&update.panel, update.axis, update.offset);
        assert!(echo.is_empty(), "echo from {} was re-broadcast", update.panel);
    }
    mirrored
}

#[test]
fn quantizer_examples() {
    assert_eq!(quantize("105", 0, 6000, 10), Ok(110));
    assert_eq!(quantize("099", 0, 6000, 10), Ok(100));
    assert!(quantize(".", 0, 6000, 10).is_err());
}

#[test]
fn click_on_ruler_sets_time() {
    let mut tl = laid_out(2000);
    assert_eq!(tl.time(), 0);

    // 100px right of the track's left edge.
    tl.pointer_down(416, 0.0);
    tl.pointer_up();

    assert_eq!(tl.time(), 100);
    let view = tl.presentation();
    assert_eq!(view.playhead_offset, 100);
    assert!(!view.playhead_hidden);
}

#[test]
fn drag_updates_time_and_follows_pointer() {
    let mut tl = laid_out(2000);
    tl.pointer_down(416, 0.0);
    assert!(tl.pointer_move(616, 16.0));

    assert_eq!(tl.time(), 300);
    assert_eq!(tl.playhead_offset(), 300);

    // Off-grid pointer: playhead is pixel exact, time snaps.
    tl.pointer_move(623, 32.0);
    assert_eq!(tl.playhead_offset(), 307);
    assert_eq!(tl.time(), 310);

    tl.pointer_up();
    assert_eq!(tl.playhead_offset(), 310);
    assert!(!tl.pointer_move(700, 48.0));
    assert_eq!(tl.time(), 310);
}

#[test]
fn drag_past_container_edge_pins_to_container() {
    let mut tl = laid_out(5000);
    scroll(&mut tl, KEYFRAME_LIST, Axis::Horizontal, 1000);
    assert_eq!(tl.ruler_scroll(), 1000);

    tl.pointer_down(700, 0.0);
    tl.pointer_move(5000, 10.0);

    // Track screen left is 316 - 1000; container right edge is 1100.
    let track_left = tl.geometry().track_left(tl.ruler_scroll());
    assert_eq!(tl.playhead_offset() + tl.ruler_scroll() + track_left, 1100);
    assert_eq!(tl.time(), 1780);
    assert!(!tl.playhead_hidden());

    // And the left edge.
    tl.pointer_move(-200, 20.0);
    assert_eq!(tl.playhead_offset() + tl.ruler_scroll() + track_left, 300);
    tl.pointer_up();
}

#[test]
fn playhead_hides_when_scrolled_out_and_returns() {
    let mut tl = laid_out(5000);
    type_into(&mut tl, Field::Time, "500");
    assert_eq!(tl.time(), 500);
    assert!(!tl.playhead_hidden());

    scroll(&mut tl, KEYFRAME_LIST, Axis::Horizontal, 550);
    assert!(tl.playhead_hidden());
    assert_eq!(tl.playhead_offset(), -50);

    scroll(&mut tl, RULER, Axis::Horizontal, 0);
    assert!(!tl.playhead_hidden());
    assert_eq!(tl.playhead_offset(), 500);
}

#[test]
fn playhead_keeps_relative_position_on_scroll() {
    let mut tl = laid_out(5000);
    tl.set_time(500);
    let before = tl.playhead_offset();
    scroll(&mut tl, RULER, Axis::Horizontal, 300);
    assert_eq!(tl.playhead_offset(), before - 300);
}

#[test]
fn playhead_hidden_past_right_boundary() {
    let mut tl = laid_out(5000);
    type_into(&mut tl, Field::Time, "4500");
    assert!(tl.playhead_hidden());
    let playhead_lines = tl
        .render_ruler()
        .into_iter()
        .filter(|c| matches!(c, RenderCommand::DrawLine { color: ThemeToken::Playhead, .. }))
        .count();
    assert_eq!(playhead_lines, 0);
}

#[test]
fn scroll_sync_round_trip_is_quiet() {
    let mut tl = laid_out(5000);
    assert_eq!(scroll(&mut tl, RULER, Axis::Horizontal, 300), 1);
    assert_eq!(scroll(&mut tl, KEYFRAME_LIST, Axis::Horizontal, 300), 0);

    let view = tl.presentation();
    let horizontal: Vec<i64> = view
        .scroll
        .iter()
        .filter(|s| s.axis == Axis::Horizontal)
        .map(|s| s.offset)
        .collect();
    assert_eq!(horizontal, vec![300, 300]);
}

#[test]
fn vertical_sync_leaves_ruler_alone() {
    let mut tl = laid_out(5000);
    assert_eq!(scroll(&mut tl, TRACK_LIST, Axis::Vertical, 120), 1);
    assert_eq!(
        tl.scroll_sync().offset(&PanelId::new(KEYFRAME_LIST), Axis::Vertical),
        Some(120)
    );
    assert_eq!(tl.ruler_scroll(), 0);
}

#[test]
fn duration_input_round_trip() {
    let mut tl = laid_out(2000);

    // Typing alone does not change the ruler.
    tl.field_input(Field::Duration, FieldInput::Focus);
    tl.field_input(Field::Duration, FieldInput::Edit("100".into()));
    assert_eq!(tl.presentation().ruler_width, 2000);
    assert_eq!(tl.field_view(Field::Duration).text, "100");

    tl.field_input(Field::Duration, FieldInput::Key(FieldKey::Enter));
    assert_eq!(tl.presentation().ruler_width, 100);

    // Escape restores.
    tl.field_input(Field::Duration, FieldInput::Focus);
    tl.field_input(Field::Duration, FieldInput::Edit("130".into()));
    assert_eq!(
        tl.field_input(Field::Duration, FieldInput::Key(FieldKey::Escape)),
        FieldEvent::Reverted
    );
    assert_eq!(tl.duration(), 100);
    assert_eq!(tl.field_view(Field::Duration).text, "100");

    // Clamped and snapped.
    assert_eq!(type_into(&mut tl, Field::Duration, "99"), FieldEvent::Committed(100));
    assert_eq!(type_into(&mut tl, Field::Duration, "5001"), FieldEvent::Committed(5000));
    assert_eq!(type_into(&mut tl, Field::Duration, "9999"), FieldEvent::Committed(6000));
}

#[test]
fn duration_below_time_pulls_time_down() {
    let mut tl = laid_out(2000);
    // Duration typed, then focus moves to time (blur commits duration).
    tl.field_input(Field::Duration, FieldInput::Focus);
    tl.field_input(Field::Duration, FieldInput::Edit("5000".into()));
    tl.field_input(Field::Duration, FieldInput::Blur);
    type_into(&mut tl, Field::Time, "3000");
    assert_eq!(tl.time(), 3000);

    type_into(&mut tl, Field::Duration, "2000");
    assert_eq!(tl.time(), 2000);
    assert_eq!(tl.field_view(Field::Time).text, "2000");
}

#[test]
fn time_field_step_buttons_move_playhead() {
    let mut tl = laid_out(2000);
    tl.field_input(Field::Time, FieldInput::Focus);
    tl.field_input(Field::Time, FieldInput::Edit("100".into()));
    let mut last = tl.playhead_offset();
    for (key, expected) in [
        (FieldKey::StepUp, 110),
        (FieldKey::StepUp, 120),
        (FieldKey::StepDown, 110),
    ] {
        tl.field_input(Field::Time, FieldInput::Key(key));
        assert_eq!(tl.time(), expected);
        assert_ne!(tl.playhead_offset(), last);
        last = tl.playhead_offset();
    }
}

#[test]
fn new_drag_heals_lost_pointer_up() {
    let mut tl = laid_out(2000);
    tl.pointer_down(416, 0.0);
    // pointer-up lost; the next press starts cleanly.
    tl.pointer_down(516, 100.0);
    assert!(tl.is_dragging());
    assert_eq!(tl.time(), 200);
    assert!(tl.pointer_up());
    assert!(!tl.pointer_up());
}

#[test]
fn idle_timeout_from_json_config() {
    let config = TimelineConfig::from_json(r#"{"drag_idle_timeout_ms": 250}"#).unwrap();
    let mut tl = TimelineController::new(config);
    tl.pointer_down(100, 0.0);
    assert!(!tl.tick(200.0));
    assert!(tl.tick(300.0));
    assert!(!tl.is_dragging());
}

#[derive(Debug, Clone)]
enum Op {
    SetTime(i64),
    SetDuration(i64),
    TimeText(String),
    DurationText(String),
    Drag(i64, i64),
    Scroll(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1000i64..8000).prop_map(Op::SetTime),
        (-1000i64..8000).prop_map(Op::SetDuration),
        "-?[0-9]{0,5}(\\.[0-9]{0,2})?".prop_map(Op::TimeText),
        "-?[0-9]{0,5}(\\.[0-9]{0,2})?".prop_map(Op::DurationText),
        (-500i64..7000, -500i64..7000).prop_map(|(a, b)| Op::Drag(a, b)),
        (0i64..6000).prop_map(Op::Scroll),
    ]
}

proptest! {
    #[test]
    fn state_stays_within_bounds(ops in prop::collection::vec(op(), 1..40)) {
        let mut tl = laid_out(2000);
        for op in ops {
            match op {
                Op::SetTime(v) => { tl.set_time(v); }
                Op::SetDuration(v) => { tl.set_duration(v); }
                Op::TimeText(s) => { tl.commit_time_text(&s); }
                Op::DurationText(s) => { tl.commit_duration_text(&s); }
                Op::Drag(from, to) => {
                    tl.pointer_down(from, 0.0);
                    tl.pointer_move(to, 1.0);
                    tl.pointer_up();
                }
                Op::Scroll(offset) => { scroll(&mut tl, RULER, Axis::Horizontal, offset); }
            }
            let view = tl.presentation();
            prop_assert!((100..=6000).contains(&view.duration));
            prop_assert!((0..=view.duration).contains(&view.time));
            prop_assert_eq!(view.time % 10, 0);
            prop_assert_eq!(view.playhead_offset, view.time - tl.ruler_scroll());
        }
    }

    #[test]
    fn ruler_and_segments_match_duration(d in 100i64..=6000) {
        let mut tl = laid_out(2000);
        let duration = tl.set_duration(d);
        let view = tl.presentation();
        prop_assert_eq!(view.ruler_width, duration);
        prop_assert_eq!(view.segment_width, duration);

        let bar_width = |cmds: Vec<RenderCommand>| {
            cmds.into_iter().find_map(|c| match c {
                RenderCommand::DrawRect { rect, .. } => Some(rect.w),
                _ => None,
            })
        };
        prop_assert_eq!(bar_width(tl.render_ruler()), Some(duration as f64));
        prop_assert_eq!(bar_width(tl.render_segments(3)), Some(duration as f64));
    }
}
