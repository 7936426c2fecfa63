//! Conversions between string widths and from primitive values.
//!
//! Width conversions are strict: ill-formed input (invalid UTF-8 bytes,
//! unpaired surrogates) is reported as a
//! [`Conversion`](strata_common::error::ErrorKind::Conversion) error rather
//! than patched over with replacement characters.

use strata_common::{Result, error::Error};

use crate::string::{Str, Utf8Str, Utf16Str};
use crate::unit::CodeUnit;

/// Re-encodes UTF-8 text as UTF-16.
pub fn to_utf16<'a>(value: &Utf8Str<'_>) -> Result<Utf16Str<'a>> {
    let text = std::str::from_utf8(value.as_units())
        .map_err(|e| Error::conversion("utf-8 text", e.to_string()))?;
    let units: Vec<u16> = text.encode_utf16().collect();
    Ok(Str::from_units(&units))
}

/// Re-encodes UTF-16 text as UTF-8.
pub fn to_utf8<'a>(value: &Utf16Str<'_>) -> Result<Utf8Str<'a>> {
    let mut units = Vec::with_capacity(value.len());
    for decoded in char::decode_utf16(value.as_units().iter().copied()) {
        let ch = decoded.map_err(|e| Error::conversion("utf-16 text", e.to_string()))?;
        u8::push_char(&mut units, ch);
    }
    Ok(Str::from_units(&units))
}

/// Renders a signed integer in decimal.
pub fn from_i64<'a, T: CodeUnit>(value: i64) -> Str<'a, T> {
    Str::from_text(&value.to_string())
}

/// Renders an unsigned integer in decimal.
pub fn from_u64<'a, T: CodeUnit>(value: u64) -> Str<'a, T> {
    Str::from_text(&value.to_string())
}

/// Renders a floating point value in its shortest round-trip form.
pub fn from_f64<'a, T: CodeUnit>(value: f64) -> Str<'a, T> {
    Str::from_text(&value.to_string())
}
