//! Lowercase hex rendering and parsing for byte buffers.

use strata_bytes::Bytes;
use strata_common::{Result, error::Error};
use strata_text::Utf8Str;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Renders `bytes` as lowercase hex, two digits per byte.
pub fn to_hex<'a>(bytes: &[u8]) -> Utf8Str<'a> {
    let mut out = Vec::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        out.push(DIGITS[usize::from(byte >> 4)]);
        out.push(DIGITS[usize::from(byte & 0xF)]);
    }
    Utf8Str::from_units(&out)
}

/// Parses hex digits (either case) back into bytes.
pub fn parse_hex<'a>(text: &[u8]) -> Result<Bytes<'a>> {
    if text.len() % 2 != 0 {
        return Err(Error::conversion("hex", "odd number of digits"));
    }
    let mut out = Vec::with_capacity(text.len() / 2);
    for pair in text.chunks_exact(2) {
        out.push(digit_value(pair[0])? << 4 | digit_value(pair[1])?);
    }
    Ok(Bytes::from_slice(&out))
}

fn digit_value(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => Err(Error::conversion(
            "hex",
            format!("unexpected character '{}'", char::from(other)),
        )),
    }
}
