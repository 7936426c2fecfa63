//! Code-unit traits for 8-bit and 16-bit text.

use bytemuck::Pod;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// A single unit of encoded text.
///
/// The two instantiations are `u8` (UTF-8 or any byte-oriented encoding) and
/// `u16` (UTF-16). Operations over [`Str`](crate::Str) treat units as opaque
/// except where this trait says otherwise: the terminator marks the logical
/// end of a string, and case mapping folds one unit at a time.
///
/// Per-unit case mapping is exact for single-unit mappings that stay within
/// the unit's range (ASCII and most of the BMP for `u16`, Latin-1 for `u8`)
/// and leaves everything else unchanged, so multi-unit sequences are never
/// torn apart.
pub trait CodeUnit: Pod + Copy + Eq + Ord + std::fmt::Debug + private::Sealed + 'static {
    /// The terminator unit.
    const NUL: Self;

    /// Widens a 7-bit ASCII byte into a unit.
    fn from_ascii(byte: u8) -> Self;

    /// The unit's scalar value.
    fn as_u32(self) -> u32;

    /// Single-unit lowercase mapping; identity where no such mapping exists.
    fn to_lower(self) -> Self;

    /// Single-unit uppercase mapping; identity where no such mapping exists.
    fn to_upper(self) -> Self;

    /// Appends `ch` in this unit's encoding.
    fn push_char(out: &mut Vec<Self>, ch: char);

    /// Appends `text` in this unit's encoding.
    fn push_str(out: &mut Vec<Self>, text: &str) {
        for ch in text.chars() {
            Self::push_char(out, ch);
        }
    }
}

/// Lowercase mapping restricted to single-`char` results.
fn lower_char(ch: char) -> char {
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Uppercase mapping restricted to single-`char` results.
fn upper_char(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

impl CodeUnit for u8 {
    const NUL: u8 = 0;

    #[inline]
    fn from_ascii(byte: u8) -> u8 {
        debug_assert!(byte.is_ascii());
        byte
    }

    #[inline]
    fn as_u32(self) -> u32 {
        u32::from(self)
    }

    fn to_lower(self) -> u8 {
        // char::from(u8) is the Latin-1 mapping; anything that maps outside
        // Latin-1 stays as-is.
        let mapped = lower_char(char::from(self));
        u8::try_from(u32::from(mapped)).unwrap_or(self)
    }

    fn to_upper(self) -> u8 {
        let mapped = upper_char(char::from(self));
        u8::try_from(u32::from(mapped)).unwrap_or(self)
    }

    fn push_char(out: &mut Vec<u8>, ch: char) {
        let mut scratch = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
    }
}

impl CodeUnit for u16 {
    const NUL: u16 = 0;

    #[inline]
    fn from_ascii(byte: u8) -> u16 {
        debug_assert!(byte.is_ascii());
        u16::from(byte)
    }

    #[inline]
    fn as_u32(self) -> u32 {
        u32::from(self)
    }

    fn to_lower(self) -> u16 {
        // Surrogate halves have no char value and fall through unchanged.
        match char::from_u32(u32::from(self)) {
            Some(ch) => u16::try_from(u32::from(lower_char(ch))).unwrap_or(self),
            None => self,
        }
    }

    fn to_upper(self) -> u16 {
        match char::from_u32(u32::from(self)) {
            Some(ch) => u16::try_from(u32::from(upper_char(ch))).unwrap_or(self),
            None => self,
        }
    }

    fn push_char(out: &mut Vec<u16>, ch: char) {
        let mut scratch = [0u16; 2];
        out.extend_from_slice(ch.encode_utf16(&mut scratch));
    }
}
