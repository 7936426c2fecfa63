//! Printf-style formatting over code-unit strings.
//!
//! The format string uses C conversions: `%d %i %o %u %x %X` for integers,
//! `%e %E %f %F %g %G %a %A` for floating point, `%p` for pointers, `%c`
//! for a character, `%s` for a string of the format's own width and `%S`
//! for the other width, and `%%` for a literal percent. Flags (`-`, `+`,
//! `0`), width, and precision are honored; size prefixes (`l`, `ll`, `h`,
//! `w`, `z`, `I32`, `I64`, ...) are parsed and ignored since [`Arg`]
//! carries full-width values.
//!
//! Arguments are passed as a slice of [`Arg`] values. [`validate`] checks
//! that the specifiers and the arguments agree in count and kind; it runs
//! automatically in debug builds and can be called directly where release
//! builds want the same guarantee.

use strata_common::{Result, error::Error};

use crate::string::Str;
use crate::unit::CodeUnit;

/// A single formatting argument.
///
/// Numeric variants are carried at full width; the size prefix in the
/// format string does not narrow them. String variants borrow the
/// caller's units.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Ptr(usize),
    Char(char),
    Str8(&'a [u8]),
    Str16(&'a [u16]),
}

impl Arg<'_> {
    /// Wraps a raw pointer for `%p`.
    pub fn ptr<X>(value: *const X) -> Arg<'static> {
        Arg::Ptr(value as usize)
    }

    fn to_i64(self) -> Option<i64> {
        match self {
            Arg::Int(value) => Some(value),
            Arg::Uint(value) => Some(value as i64),
            Arg::Float(value) => Some(value as i64),
            Arg::Char(value) => Some(i64::from(u32::from(value))),
            Arg::Ptr(_) | Arg::Str8(_) | Arg::Str16(_) => None,
        }
    }

    fn to_u64(self) -> Option<u64> {
        match self {
            Arg::Int(value) => Some(value as u64),
            Arg::Uint(value) => Some(value),
            Arg::Float(value) => Some(value as u64),
            Arg::Char(value) => Some(u64::from(u32::from(value))),
            Arg::Ptr(value) => Some(value as u64),
            Arg::Str8(_) | Arg::Str16(_) => None,
        }
    }

    fn to_f64(self) -> Option<f64> {
        match self {
            Arg::Float(value) => Some(value),
            Arg::Int(value) => Some(value as f64),
            Arg::Uint(value) => Some(value as f64),
            Arg::Ptr(_) | Arg::Char(_) | Arg::Str8(_) | Arg::Str16(_) => None,
        }
    }

    fn to_char(self) -> Option<char> {
        match self {
            Arg::Char(value) => Some(value),
            Arg::Int(value) => u32::try_from(value).ok().and_then(char::from_u32),
            Arg::Uint(value) => u32::try_from(value).ok().and_then(char::from_u32),
            _ => None,
        }
    }
}

impl From<i8> for Arg<'_> {
    fn from(value: i8) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<i16> for Arg<'_> {
    fn from(value: i16) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<i64> for Arg<'_> {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        Arg::Int(value as i64)
    }
}

impl From<u8> for Arg<'_> {
    fn from(value: u8) -> Self {
        Arg::Uint(u64::from(value))
    }
}

impl From<u16> for Arg<'_> {
    fn from(value: u16) -> Self {
        Arg::Uint(u64::from(value))
    }
}

impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Arg::Uint(u64::from(value))
    }
}

impl From<u64> for Arg<'_> {
    fn from(value: u64) -> Self {
        Arg::Uint(value)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Arg::Uint(value as u64)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str8(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Arg::Str8(value)
    }
}

impl<'a> From<&'a [u16]> for Arg<'a> {
    fn from(value: &'a [u16]) -> Self {
        Arg::Str16(value)
    }
}

impl<'a, 'b> From<&'a Str<'b, u8>> for Arg<'a> {
    fn from(value: &'a Str<'b, u8>) -> Self {
        Arg::Str8(value.as_units())
    }
}

impl<'a, 'b> From<&'a Str<'b, u16>> for Arg<'a> {
    fn from(value: &'a Str<'b, u16>) -> Self {
        Arg::Str16(value.as_units())
    }
}

/// Argument kind a conversion expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Ptr,
    Char,
    Narrow,
    Wide,
}

/// A parsed `%` specifier.
struct Spec {
    minus: bool,
    plus: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    conv: char,
    kind: Kind,
}

fn unit_at<T: CodeUnit>(fmt: &[T], pos: usize) -> Option<u32> {
    fmt.get(pos).map(|unit| unit.as_u32())
}

fn kind_of(conv: char, wide_format: bool) -> Result<Kind> {
    Ok(match conv {
        'd' | 'i' | 'o' | 'u' | 'x' | 'X' => Kind::Int,
        'e' | 'E' | 'f' | 'F' | 'g' | 'G' | 'a' | 'A' => Kind::Float,
        'p' => Kind::Ptr,
        'c' => Kind::Char,
        's' if wide_format => Kind::Wide,
        's' => Kind::Narrow,
        'S' if wide_format => Kind::Narrow,
        'S' => Kind::Wide,
        other => {
            return Err(Error::bad_format(format!("unknown conversion '{other}'")));
        }
    })
}

/// Parses the specifier body, with `pos` positioned right after the `%`.
/// Leaves `pos` past the conversion character.
fn parse_spec<T: CodeUnit>(fmt: &[T], pos: &mut usize) -> Result<Spec> {
    let mut spec = Spec {
        minus: false,
        plus: false,
        zero: false,
        width: 0,
        precision: None,
        conv: '\0',
        kind: Kind::Int,
    };

    loop {
        match unit_at(fmt, *pos) {
            Some(unit) if unit == u32::from(b'-') => spec.minus = true,
            Some(unit) if unit == u32::from(b'+') => spec.plus = true,
            Some(unit) if unit == u32::from(b'0') => spec.zero = true,
            Some(unit) if unit == u32::from(b' ') || unit == u32::from(b'#') => {}
            _ => break,
        }
        *pos += 1;
    }

    while let Some(digit) =
        unit_at(fmt, *pos).and_then(char::from_u32).and_then(|c| c.to_digit(10))
    {
        spec.width = spec.width * 10 + digit as usize;
        *pos += 1;
    }

    if unit_at(fmt, *pos) == Some(u32::from(b'.')) {
        *pos += 1;
        let mut precision = 0;
        while let Some(digit) =
            unit_at(fmt, *pos).and_then(char::from_u32).and_then(|c| c.to_digit(10))
        {
            precision = precision * 10 + digit as usize;
            *pos += 1;
        }
        spec.precision = Some(precision);
    }

    // Size prefixes carry no information here; Arg values are full-width.
    loop {
        match unit_at(fmt, *pos) {
            Some(unit)
                if [b'h', b'l', b'w', b'z', b'j', b't']
                    .iter()
                    .any(|&p| unit == u32::from(p)) =>
            {
                *pos += 1;
            }
            Some(unit) if unit == u32::from(b'I') => {
                *pos += 1;
                let pair = (unit_at(fmt, *pos), unit_at(fmt, *pos + 1));
                let is_32 = pair == (Some(u32::from(b'3')), Some(u32::from(b'2')));
                let is_64 = pair == (Some(u32::from(b'6')), Some(u32::from(b'4')));
                if is_32 || is_64 {
                    *pos += 2;
                }
            }
            _ => break,
        }
    }

    let conv = unit_at(fmt, *pos)
        .and_then(char::from_u32)
        .ok_or_else(|| Error::bad_format("truncated format specifier"))?;
    *pos += 1;
    spec.conv = conv;
    spec.kind = kind_of(conv, std::mem::size_of::<T>() == 2)?;
    Ok(spec)
}

/// Checks that the specifiers in `fmt` and the values in `args` agree in
/// count and kind.
pub fn validate<T: CodeUnit>(fmt: &[T], args: &[Arg<'_>]) -> Result<()> {
    let mut next = 0;
    let mut pos = 0;
    while pos < fmt.len() {
        if fmt[pos].as_u32() != u32::from(b'%') {
            pos += 1;
            continue;
        }
        pos += 1;
        if unit_at(fmt, pos) == Some(u32::from(b'%')) {
            pos += 1;
            continue;
        }
        let spec = parse_spec(fmt, &mut pos)?;
        let arg = args
            .get(next)
            .ok_or_else(|| Error::bad_format("more specifiers than arguments"))?;
        check_kind(&spec, arg)?;
        next += 1;
    }
    if next != args.len() {
        return Err(Error::bad_format("fewer specifiers than arguments"));
    }
    Ok(())
}

fn check_kind(spec: &Spec, arg: &Arg<'_>) -> Result<()> {
    let ok = match spec.kind {
        Kind::Int => matches!(arg, Arg::Int(_) | Arg::Uint(_)),
        Kind::Float => matches!(arg, Arg::Float(_)),
        Kind::Ptr => matches!(arg, Arg::Ptr(_)),
        Kind::Char => matches!(arg, Arg::Char(_)),
        Kind::Narrow => matches!(arg, Arg::Str8(_)),
        Kind::Wide => matches!(arg, Arg::Str16(_)),
    };
    if ok {
        return Ok(());
    }
    let expected = match spec.kind {
        Kind::Int => "integer",
        Kind::Float => "floating point",
        Kind::Ptr => "pointer",
        Kind::Char => "character",
        Kind::Narrow => "narrow string",
        Kind::Wide => "wide string",
    };
    Err(Error::bad_format(format!(
        "{expected} value expected for '%{}'",
        spec.conv
    )))
}

/// Renders `fmt` with `args` into a fresh heap-backed string.
pub fn format<'a, T: CodeUnit>(fmt: &[T], args: &[Arg<'_>]) -> Result<Str<'a, T>> {
    if cfg!(debug_assertions) {
        validate(fmt, args)?;
    }
    let mut out: Vec<T> = Vec::with_capacity(fmt.len());
    let mut next = 0;
    let mut pos = 0;
    while pos < fmt.len() {
        if fmt[pos].as_u32() != u32::from(b'%') {
            out.push(fmt[pos]);
            pos += 1;
            continue;
        }
        pos += 1;
        if unit_at(fmt, pos) == Some(u32::from(b'%')) {
            out.push(fmt[pos]);
            pos += 1;
            continue;
        }
        let spec = parse_spec(fmt, &mut pos)?;
        let arg = args
            .get(next)
            .ok_or_else(|| Error::bad_format("more specifiers than arguments"))?;
        next += 1;
        render_one(&mut out, &spec, arg)?;
    }
    Ok(Str::from_units(&out))
}

fn render_one<T: CodeUnit>(out: &mut Vec<T>, spec: &Spec, arg: &Arg<'_>) -> Result<()> {
    if matches!(spec.conv, 's' | 'S') {
        return render_text(out, spec, arg);
    }
    let expect = |value: Option<String>| {
        value.ok_or_else(|| {
            Error::bad_format(format!("unsupported argument for '%{}'", spec.conv))
        })
    };
    let precision = spec.precision.unwrap_or(6);
    let piece = match spec.conv {
        'd' | 'i' => expect(arg.to_i64().map(|v| {
            if spec.plus && v >= 0 {
                format!("+{v}")
            } else {
                v.to_string()
            }
        }))?,
        'u' => expect(arg.to_u64().map(|v| v.to_string()))?,
        'o' => expect(arg.to_u64().map(|v| format!("{v:o}")))?,
        'x' => expect(arg.to_u64().map(|v| format!("{v:x}")))?,
        'X' => expect(arg.to_u64().map(|v| format!("{v:X}")))?,
        'p' => expect(arg.to_u64().map(|v| format!("{v:#x}")))?,
        'f' | 'F' => expect(arg.to_f64().map(|v| format!("{v:.precision$}")))?,
        'e' | 'a' => expect(arg.to_f64().map(|v| format!("{v:.precision$e}")))?,
        'E' | 'A' => expect(arg.to_f64().map(|v| format!("{v:.precision$E}")))?,
        'g' | 'G' => expect(arg.to_f64().map(|v| v.to_string()))?,
        'c' => expect(arg.to_char().map(String::from))?,
        _ => return Err(Error::bad_format(format!("unknown conversion '{}'", spec.conv))),
    };
    let numeric = spec.conv != 'c';
    pad_and_push(out, spec, &piece, numeric);
    Ok(())
}

fn pad_and_push<T: CodeUnit>(out: &mut Vec<T>, spec: &Spec, piece: &str, numeric: bool) {
    let pad = spec.width.saturating_sub(piece.chars().count());
    if pad == 0 {
        T::push_str(out, piece);
    } else if spec.minus {
        T::push_str(out, piece);
        out.extend(std::iter::repeat(T::from_ascii(b' ')).take(pad));
    } else if spec.zero && numeric {
        // Zeros go between the sign and the digits.
        let mut rest = piece.chars();
        match rest.next() {
            Some(sign @ ('-' | '+')) => {
                T::push_char(out, sign);
                out.extend(std::iter::repeat(T::from_ascii(b'0')).take(pad));
                T::push_str(out, rest.as_str());
            }
            _ => {
                out.extend(std::iter::repeat(T::from_ascii(b'0')).take(pad));
                T::push_str(out, piece);
            }
        }
    } else {
        out.extend(std::iter::repeat(T::from_ascii(b' ')).take(pad));
        T::push_str(out, piece);
    }
}

/// Renders a `%s`/`%S` argument, re-encoding across widths when needed.
fn render_text<T: CodeUnit>(out: &mut Vec<T>, spec: &Spec, arg: &Arg<'_>) -> Result<()> {
    let mut units: Vec<T> = Vec::new();
    match arg {
        Arg::Str8(text) => push_narrow(&mut units, text, spec.precision),
        Arg::Str16(text) => push_wide(&mut units, text, spec.precision),
        _ => {
            return Err(Error::bad_format(format!(
                "string value expected for '%{}'",
                spec.conv
            )));
        }
    }
    let pad = spec.width.saturating_sub(units.len());
    if spec.minus {
        out.extend_from_slice(&units);
        out.extend(std::iter::repeat(T::from_ascii(b' ')).take(pad));
    } else {
        out.extend(std::iter::repeat(T::from_ascii(b' ')).take(pad));
        out.extend_from_slice(&units);
    }
    Ok(())
}

fn push_narrow<T: CodeUnit>(out: &mut Vec<T>, text: &[u8], precision: Option<usize>) {
    let limit = precision.unwrap_or(text.len()).min(text.len());
    let text = &text[..limit];
    if std::mem::size_of::<T>() == 1 {
        out.extend_from_slice(bytemuck::cast_slice(text));
    } else {
        for ch in String::from_utf8_lossy(text).chars() {
            T::push_char(out, ch);
        }
    }
}

fn push_wide<T: CodeUnit>(out: &mut Vec<T>, text: &[u16], precision: Option<usize>) {
    let limit = precision.unwrap_or(text.len()).min(text.len());
    let text = &text[..limit];
    if std::mem::size_of::<T>() == 2 {
        out.extend_from_slice(bytemuck::cast_slice(text));
    } else {
        for decoded in char::decode_utf16(text.iter().copied()) {
            T::push_char(out, decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Utf8Str, Utf16Str};
    use strata_common::error::ErrorKind;

    fn bad_format(err: strata_common::error::Error) -> bool {
        matches!(err.kind(), ErrorKind::BadFormat { .. })
    }

    #[test]
    fn test_format_basic() {
        let value =
            Utf8Str::format_text("%s = %d", &[Arg::from("count"), Arg::from(42)]).unwrap();
        assert_eq!(value, "count = 42");
    }

    #[test]
    fn test_format_literal_percent() {
        let value = Utf8Str::format_text("%d%%", &[Arg::from(42)]).unwrap();
        assert_eq!(value, "42%");
        let value = Utf8Str::format_text("100%%", &[]).unwrap();
        assert_eq!(value, "100%");
    }

    #[test]
    fn test_format_integer_radixes() {
        let value = Utf8Str::format_text(
            "%x %X %o %u",
            &[
                Arg::from(255u32),
                Arg::from(255u32),
                Arg::from(255u32),
                Arg::from(7u32),
            ],
        )
        .unwrap();
        assert_eq!(value, "ff FF 377 7");
    }

    #[test]
    fn test_format_width_and_flags() {
        assert_eq!(
            Utf8Str::format_text("%05d", &[Arg::from(42)]).unwrap(),
            "00042"
        );
        assert_eq!(
            Utf8Str::format_text("%-5d|", &[Arg::from(42)]).unwrap(),
            "42   |"
        );
        assert_eq!(
            Utf8Str::format_text("%5d", &[Arg::from(42)]).unwrap(),
            "   42"
        );
        assert_eq!(Utf8Str::format_text("%+d", &[Arg::from(42)]).unwrap(), "+42");
        assert_eq!(
            Utf8Str::format_text("%06d", &[Arg::from(-42)]).unwrap(),
            "-00042"
        );
    }

    #[test]
    fn test_format_floats() {
        assert_eq!(
            Utf8Str::format_text("%f", &[Arg::from(1.5)]).unwrap(),
            "1.500000"
        );
        assert_eq!(
            Utf8Str::format_text("%.2f", &[Arg::from(1.5)]).unwrap(),
            "1.50"
        );
        assert_eq!(
            Utf8Str::format_text("%.1e", &[Arg::from(1.5)]).unwrap(),
            "1.5e0"
        );
        assert_eq!(Utf8Str::format_text("%g", &[Arg::from(1.5)]).unwrap(), "1.5");
    }

    #[test]
    fn test_format_char_and_pointer() {
        assert_eq!(
            Utf8Str::format_text("%c%c", &[Arg::from('O'), Arg::from('K')]).unwrap(),
            "OK"
        );
        assert_eq!(
            Utf8Str::format_text("%p", &[Arg::Ptr(0x1F40)]).unwrap(),
            "0x1f40"
        );
    }

    #[test]
    fn test_format_string_precision() {
        let value = Utf8Str::format_text("%.3s", &[Arg::from("abcdef")]).unwrap();
        assert_eq!(value, "abc");
        let value = Utf8Str::format_text("%8s|", &[Arg::from("abc")]).unwrap();
        assert_eq!(value, "     abc|");
    }

    #[test]
    fn test_format_size_prefixes_are_ignored() {
        let value = Utf8Str::format_text(
            "%lld %I64d %hu",
            &[Arg::from(1i64), Arg::from(2i64), Arg::from(3u32)],
        )
        .unwrap();
        assert_eq!(value, "1 2 3");
    }

    #[test]
    fn test_format_wide_output() {
        let wide = Utf16Str::from_text("пример");
        let value =
            Utf16Str::format_text("%d: %s", &[Arg::from(7), Arg::from(&wide)]).unwrap();
        assert_eq!(value, "7: пример");
    }

    #[test]
    fn test_format_cross_width_strings() {
        // A narrow argument in a wide format string goes through %S.
        let value = Utf16Str::format_text("%S", &[Arg::from("narrow")]).unwrap();
        assert_eq!(value, "narrow");

        // And a wide argument in a narrow format string likewise.
        let wide: Vec<u16> = "wide".encode_utf16().collect();
        let value = Utf8Str::format_text("%S", &[Arg::from(wide.as_slice())]).unwrap();
        assert_eq!(value, "wide");
    }

    #[test]
    fn test_validate_argument_count() {
        let fmt = b"%d and %d";
        assert!(validate(fmt, &[Arg::from(1), Arg::from(2)]).is_ok());
        assert!(bad_format(validate(fmt, &[Arg::from(1)]).unwrap_err()));
        assert!(bad_format(
            validate(fmt, &[Arg::from(1), Arg::from(2), Arg::from(3)]).unwrap_err()
        ));
    }

    #[test]
    fn test_validate_argument_kinds() {
        assert!(bad_format(
            validate(b"%d", &[Arg::from("text")]).unwrap_err()
        ));
        assert!(bad_format(
            validate(b"%f", &[Arg::from(1)]).unwrap_err()
        ));
        assert!(bad_format(
            validate(b"%s", &[Arg::from(1)]).unwrap_err()
        ));
        assert!(validate(b"%d", &[Arg::from(1u32)]).is_ok());
        assert!(validate(b"%s", &[Arg::from("text")]).is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_format() {
        assert!(bad_format(validate(b"%q", &[Arg::from(1)]).unwrap_err()));
        assert!(bad_format(validate::<u8>(b"tail%", &[]).unwrap_err()));
    }

    #[test]
    fn test_format_reports_malformed_format() {
        assert!(bad_format(
            Utf8Str::format_text("%q", &[Arg::from(1)]).unwrap_err()
        ));
        assert!(bad_format(Utf8Str::format_text("tail%", &[]).unwrap_err()));
    }
}
