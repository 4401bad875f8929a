use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    #[error("not an integer: {raw:?}")]
    InvalidInput { raw: String },
}

/// Parse a numeric text field value into an integer.
///
/// Accepts an optional sign, at least one decimal digit, and an optional
/// fractional part which is truncated (`"105.5"` → `105`). Leading zeros are
/// ignored (`"099"` → `99`). Anything else, including a bare `"."`, `".5"`,
/// `"-"` or the empty string, is rejected.
///
/// Values beyond the `i64` range saturate; callers clamp them anyway.
pub fn parse_integer(raw: &str) -> Result<i64, QuantizeError> {
    let invalid = || QuantizeError::InvalidInput {
        raw: raw.to_owned(),
    };

    let text = raw.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.is_some_and(|f| !f.bytes().all(|b| b.is_ascii_digit())) {
        return Err(invalid());
    }

    let magnitude = whole.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Round `value` to the nearest multiple of `step`. Ties round up (towards
/// positive infinity). A non-positive `step` disables rounding.
pub fn round_to_step(value: i64, step: i64) -> i64 {
    if step <= 0 {
        return value;
    }
    value
        .saturating_add(step / 2)
        .div_euclid(step)
        .saturating_mul(step)
}

/// Clamp `value` into `[min, max]`, then snap it to the `step` grid.
///
/// If snapping pushes the value out of range (bounds that are not multiples
/// of `step`), the nearest grid point inside the range is used instead; when
/// the range contains no grid point at all, the clamped value is returned
/// unsnapped.
pub fn quantize_value(value: i64, min: i64, max: i64, step: i64) -> i64 {
    let max = max.max(min);
    let clamped = value.clamp(min, max);
    let rounded = round_to_step(clamped, step);

    if (min..=max).contains(&rounded) {
        return rounded;
    }
    let inward = if rounded > max {
        rounded - step
    } else {
        rounded + step
    };
    if (min..=max).contains(&inward) {
        inward
    } else {
        clamped
    }
}

/// Parse `raw` and quantize it into `[min, max]` on the `step` grid.
///
/// The quantizer keeps no memory: on [`QuantizeError::InvalidInput`] the
/// caller falls back to its last committed value.
pub fn quantize(raw: &str, min: i64, max: i64, step: i64) -> Result<i64, QuantizeError> {
    parse_integer(raw).map(|value| quantize_value(value, min, max, step))
}
