//! Base-36 positional encoding over `[0-9a-z]`.
//!
//! Digits are written most-significant first with no sign and no padding,
//! so `encode` never emits leading zeros except for the value zero itself,
//! which encodes as `"0"`.

use crate::error::DecodeError;

/// The 36-character alphabet, in digit order.
pub const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Radix of the encoding.
const RADIX: u128 = ALPHABET.len() as u128;

/// Maximum number of digits needed for a `u128`.
pub const MAX_LEN: usize = 25;

/// Encodes `value` as a base-36 string.
#[must_use]
pub fn encode(value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut buf = [0u8; MAX_LEN];
    let mut pos = MAX_LEN;
    let mut rest = value;
    while rest > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(rest % RADIX) as usize];
        rest /= RADIX;
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Decodes a base-36 string back to its value.
///
/// Leading `'0'` digits are accepted, so `"007"` decodes to `7`.
pub fn decode(text: &str) -> Result<u128, DecodeError> {
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    text.char_indices().try_fold(0u128, |acc, (index, ch)| {
        let digit = digit_value(ch).ok_or(DecodeError::InvalidChar { ch, index })?;
        acc.checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Returns true if `text` decodes successfully.
#[must_use]
pub fn is_valid(text: &str) -> bool {
    decode(text).is_ok()
}

/// Number of digits `encode(value)` produces.
#[must_use]
pub fn encoded_len(value: u128) -> usize {
    let mut len = 1;
    let mut rest = value / RADIX;
    while rest > 0 {
        len += 1;
        rest /= RADIX;
    }
    len
}

fn digit_value(ch: char) -> Option<u128> {
    match ch {
        '0'..='9' => Some(u128::from(ch as u8 - b'0')),
        'a'..='z' => Some(u128::from(ch as u8 - b'a') + 10),
        _ => None,
    }
}
