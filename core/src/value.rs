//! Coercion of raw control input into a percentage.

use std::fmt::Display;

/// Upper bound of the progress value.
pub const MAX_PERCENT: u8 = 100;

/// Coerce raw input into a percentage in `0..=100`.
///
/// Every character that is not an ASCII digit is dropped before parsing, so a
/// sign or a decimal point does not survive: `"-5"` reads as 5 and `"12.5"` as
/// 125 (then clamped to 100). Input with no digits reads as 0. Numbers go
/// through their `Display` form, the same way text from an `<input>` does.
pub fn coerce_percent(raw: impl Display) -> u8 {
    let mut value: u32 = 0;
    for digit in raw.to_string().chars().filter_map(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(digit);
    }
    u8::try_from(value.min(u32::from(MAX_PERCENT))).unwrap_or(MAX_PERCENT)
}
