//! Edit buffer for the time and duration number fields.
//!
//! The field shows whatever the user is typing while it has focus, but only
//! hands a value to the timeline on an explicit commit: Enter, Tab, blur, or
//! a native step button. Escape throws the buffer away.

use serde::{Deserialize, Serialize};

use crate::quantize::{parse_integer, quantize, quantize_value};

/// Keys the field reacts to. Everything else is plain text editing and
/// arrives as [`FieldInput::Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKey {
    Enter,
    Tab,
    Escape,
    /// Native step-up button or ArrowUp.
    StepUp,
    /// Native step-down button or ArrowDown.
    StepDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldInput {
    Focus,
    /// The full text of the input after a keystroke.
    Edit(String),
    Key(FieldKey),
    Blur,
}

/// What a single input did to the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    /// Nothing committed; at most the edit buffer changed.
    Idle,
    /// A new value was committed and should be applied.
    Committed(i64),
    /// The buffer was discarded (Escape, or it did not parse) and the
    /// display went back to the last committed value.
    Reverted,
}

/// Snapshot consumed by the view layer to render the input element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub text: String,
    pub focused: bool,
    /// Advisory styling flag: the focused buffer does not parse.
    pub invalid: bool,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

#[derive(Debug, Clone)]
pub struct NumericField {
    committed: i64,
    /// `Some` while focused.
    buffer: Option<String>,
    min: i64,
    max: i64,
    step: i64,
}

impl NumericField {
    pub fn new(value: i64, min: i64, max: i64, step: i64) -> Self {
        Self {
            committed: value,
            buffer: None,
            min,
            max,
            step,
        }
    }

    pub fn committed(&self) -> i64 {
        self.committed
    }

    pub fn is_focused(&self) -> bool {
        self.buffer.is_some()
    }

    /// Text to display: the live buffer while focused, the committed value
    /// otherwise.
    pub fn display(&self) -> String {
        match &self.buffer {
            Some(text) => text.clone(),
            None => self.committed.to_string(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.buffer
            .as_deref()
            .is_some_and(|text| parse_integer(text).is_err())
    }

    pub fn view(&self) -> FieldView {
        FieldView {
            text: self.display(),
            focused: self.is_focused(),
            invalid: self.is_invalid(),
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }

    /// Sync the committed value from the owner (e.g. time moved by a ruler
    /// drag). An in-progress edit is left alone.
    pub fn set_committed(&mut self, value: i64) {
        self.committed = value;
    }

    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max;
    }

    pub fn apply(&mut self, input: FieldInput) -> FieldEvent {
        match input {
            FieldInput::Focus => {
                if self.buffer.is_none() {
                    self.buffer = Some(self.committed.to_string());
                }
                FieldEvent::Idle
            }
            FieldInput::Edit(text) => {
                self.buffer = Some(text);
                FieldEvent::Idle
            }
            FieldInput::Key(FieldKey::Enter | FieldKey::Tab) | FieldInput::Blur => {
                match self.buffer.take() {
                    Some(text) => self.commit(&text),
                    None => FieldEvent::Idle,
                }
            }
            FieldInput::Key(FieldKey::Escape) => {
                if self.buffer.take().is_some() {
                    FieldEvent::Reverted
                } else {
                    FieldEvent::Idle
                }
            }
            FieldInput::Key(FieldKey::StepUp) => self.step_by(self.step),
            FieldInput::Key(FieldKey::StepDown) => self.step_by(-self.step),
        }
    }

    fn commit(&mut self, text: &str) -> FieldEvent {
        match quantize(text, self.min, self.max, self.step) {
            Ok(value) => {
                self.committed = value;
                FieldEvent::Committed(value)
            }
            Err(err) => {
                log::debug!("reverting field to {}: {err}", self.committed);
                FieldEvent::Reverted
            }
        }
    }

    /// Native step buttons commit immediately and keep focus; the buffer is
    /// replaced by the stepped value.
    fn step_by(&mut self, delta: i64) -> FieldEvent {
        let base = self
            .buffer
            .as_deref()
            .and_then(|text| parse_integer(text).ok())
            .unwrap_or(self.committed);
        let value = quantize_value(base.saturating_add(delta), self.min, self.max, self.step);
        self.committed = value;
        if self.buffer.is_some() {
            self.buffer = Some(value.to_string());
        }
        FieldEvent::Committed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duration_field() -> NumericField {
        NumericField::new(2000, 100, 6000, 10)
    }

    fn type_text(field: &mut NumericField, text: &str) {
        field.apply(FieldInput::Focus);
        field.apply(FieldInput::Edit(text.to_owned()));
    }

    #[test]
    fn typing_does_not_commit() {
        let mut field = duration_field();
        type_text(&mut field, "100");
        assert_eq!(field.display(), "100");
        assert_eq!(field.committed(), 2000);
    }

    #[test]
    fn enter_commits_and_unfocuses() {
        let mut field = duration_field();
        type_text(&mut field, "100");
        assert_eq!(field.apply(FieldInput::Key(FieldKey::Enter)), FieldEvent::Committed(100));
        assert!(!field.is_focused());
        assert_eq!(field.display(), "100");
    }

    #[test]
    fn tab_and_blur_commit() {
        let mut field = duration_field();
        type_text(&mut field, "200");
        assert_eq!(field.apply(FieldInput::Key(FieldKey::Tab)), FieldEvent::Committed(200));

        type_text(&mut field, "300");
        assert_eq!(field.apply(FieldInput::Blur), FieldEvent::Committed(300));
    }

    #[test]
    fn escape_restores_previous_value() {
        let mut field = duration_field();
        type_text(&mut field, "100");
        field.apply(FieldInput::Key(FieldKey::Enter));

        type_text(&mut field, "130");
        assert_eq!(field.apply(FieldInput::Key(FieldKey::Escape)), FieldEvent::Reverted);
        assert_eq!(field.display(), "100");
        assert_eq!(field.committed(), 100);
        assert!(!field.is_focused());
    }

    #[test]
    fn step_buttons_commit_each_press() {
        let mut field = duration_field();
        type_text(&mut field, "100");
        let presses = [
            (FieldKey::StepUp, 110),
            (FieldKey::StepUp, 120),
            (FieldKey::StepUp, 130),
            (FieldKey::StepDown, 120),
            (FieldKey::StepDown, 110),
            (FieldKey::StepDown, 100),
        ];
        for (key, expected) in presses {
            assert_eq!(field.apply(FieldInput::Key(key)), FieldEvent::Committed(expected));
            assert_eq!(field.display(), expected.to_string());
            assert!(field.is_focused());
        }
    }

    #[test]
    fn step_down_stops_at_min() {
        let mut field = NumericField::new(0, 0, 2000, 10);
        assert_eq!(field.apply(FieldInput::Key(FieldKey::StepDown)), FieldEvent::Committed(0));
    }

    #[test]
    fn invalid_buffer_flags_then_reverts() {
        let mut field = duration_field();
        type_text(&mut field, "100");
        field.apply(FieldInput::Key(FieldKey::Enter));

        type_text(&mut field, ".");
        assert!(field.is_invalid());
        assert_eq!(field.apply(FieldInput::Key(FieldKey::Enter)), FieldEvent::Reverted);
        assert_eq!(field.display(), "100");
        assert!(!field.is_invalid());
    }

    #[test]
    fn commit_quantizes() {
        let mut field = NumericField::new(0, 0, 2000, 10);
        type_text(&mut field, "105.5");
        assert_eq!(field.apply(FieldInput::Blur), FieldEvent::Committed(110));

        type_text(&mut field, "-10");
        assert_eq!(field.apply(FieldInput::Blur), FieldEvent::Committed(0));

        type_text(&mut field, "099");
        assert_eq!(field.apply(FieldInput::Blur), FieldEvent::Committed(100));
    }

    #[test]
    fn blur_without_focus_is_idle() {
        let mut field = duration_field();
        assert_eq!(field.apply(FieldInput::Blur), FieldEvent::Idle);
    }
}
