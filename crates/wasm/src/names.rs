//! String names used across the JS boundary.

use scrubline_core::{Field, FieldKey};
use scrubline_protocol::Axis;

use crate::error::BridgeError;

pub fn parse_field(name: &str) -> Result<Field, BridgeError> {
    match name {
        "time" => Ok(Field::Time),
        "duration" => Ok(Field::Duration),
        _ => Err(BridgeError::UnknownField(name.to_owned())),
    }
}

pub fn parse_axis(name: &str) -> Result<Axis, BridgeError> {
    match name {
        "horizontal" | "x" => Ok(Axis::Horizontal),
        "vertical" | "y" => Ok(Axis::Vertical),
        _ => Err(BridgeError::UnknownAxis(name.to_owned())),
    }
}

/// Accepts `KeyboardEvent.key` values plus `stepUp`/`stepDown` for the
/// native spinner buttons (reported by the host from `input` events).
pub fn parse_key(name: &str) -> Result<FieldKey, BridgeError> {
    match name {
        "Enter" => Ok(FieldKey::Enter),
        "Tab" => Ok(FieldKey::Tab),
        "Escape" | "Esc" => Ok(FieldKey::Escape),
        "ArrowUp" | "stepUp" => Ok(FieldKey::StepUp),
        "ArrowDown" | "stepDown" => Ok(FieldKey::StepDown),
        _ => Err(BridgeError::UnknownKey(name.to_owned())),
    }
}

/// Round a CSS pixel value to the integer grid the core works on.
pub fn px(value: f64) -> i64 {
    value.round() as i64
}

/// Integer ms back to a JS number.
pub fn ms(value: i64) -> f64 {
    value as f64
}
