//! Temperature register encoding.
//!
//! TEMP, T_OS and T_HYST share one 16-bit format:
//!
//! ```text
//! | 15 .. 8          | 7 .. 4          | 3 .. 0 |
//! | integer, signed  | 1/16ths, u4     | 0      |
//! ```

use num_traits::Float;

/// Value of one fractional LSB, in C.
pub const RESOLUTION: f32 = 0.0625;
/// Lowest encodable temperature.
pub const MIN_CELSIUS: f32 = -128.0;
/// Highest encodable temperature.
pub const MAX_CELSIUS: f32 = 127.9375;

const FRAC_MSK: u16 = 0x00f0;
const FRAC_POS: u16 = 4;

/// Decode a register word into degrees Celsius. Every `u16` is valid.
pub fn decode(raw: u16) -> f32 {
    let whole = (raw >> 8) as u8 as i8;
    let frac = (raw & FRAC_MSK) >> FRAC_POS;
    whole as f32 + frac as f32 * RESOLUTION
}

/// Encode degrees Celsius into a register word.
///
/// The integer byte is `celsius` truncated toward zero and wrapped to 8 bits;
/// the fraction nibble is `floor(celsius * 16) mod 16`. For negative
/// non-integer input these do not describe the same value, e.g. `-0.5`
/// encodes as `0x0080`. Devices in the field are programmed this way, keep it.
///
/// Wrapping only holds while `celsius` fits in an `i32`. Beyond that the
/// float to int casts saturate, `1e10` encodes as `0xfff0`.
pub fn encode(celsius: f32) -> u16 {
    let whole = celsius as i32 as u8;
    let frac = ((celsius * 16.0).floor() as i32).rem_euclid(16) as u16;
    ((whole as u16) << 8) | (frac << FRAC_POS)
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}
