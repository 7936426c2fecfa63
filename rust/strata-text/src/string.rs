//! Null-terminated string over a [`Buffer`] of code units.

use std::fmt;

use strata_alloc::Allocator;
use strata_bytes::Buffer;
use strata_common::{Result, error::Error};

use crate::format::Arg;
use crate::unit::CodeUnit;

/// String with an 8-bit code unit, the default for UTF-8 text.
pub type Utf8Str<'a> = Str<'a, u8>;

/// String with a 16-bit code unit, for UTF-16 text.
pub type Utf16Str<'a> = Str<'a, u16>;

/// An allocator-aware, null-terminated string of code units `T`.
///
/// Two sizes govern every operation: the *capacity* is the number of units
/// the backing buffer holds (including the terminator slot), while the
/// *logical length* is the unit count before the first terminator. A string
/// whose capacity already covers a mutation is modified in place and keeps
/// its address; [`reserve`](Str::reserve) makes that explicit for callers
/// that want to pin the allocation up front.
///
/// Allocation exhaustion is not an error, matching
/// [`Buffer`](strata_bytes::Buffer): a mutation whose backing allocation was
/// refused leaves the string empty, observable through
/// [`capacity`](Str::capacity).
#[derive(Clone)]
pub struct Str<'a, T: CodeUnit> {
    buf: Buffer<'a, T>,
}

impl<'a, T: CodeUnit> Str<'a, T> {
    /// Creates an empty string backed by the process heap.
    pub fn new() -> Str<'a, T> {
        Self::with_allocator(None)
    }

    /// Creates an empty string that will draw memory from `allocator`
    /// (or from the process heap when `None`).
    pub fn with_allocator(allocator: Option<&'a dyn Allocator>) -> Str<'a, T> {
        Str {
            buf: Buffer::with_allocator(allocator),
        }
    }

    /// Creates an empty string with room for `length` units plus the
    /// terminator.
    pub fn with_capacity(length: usize) -> Str<'a, T> {
        Self::with_capacity_in(length, None)
    }

    /// Creates an empty string with room for `length` units, drawn from
    /// `allocator`.
    pub fn with_capacity_in(length: usize, allocator: Option<&'a dyn Allocator>) -> Str<'a, T> {
        let size = (length + 1) * std::mem::size_of::<T>();
        Str {
            buf: Buffer::zeroed_in(size, allocator),
        }
    }

    /// Creates a string holding a copy of `units`.
    pub fn from_units(units: &[T]) -> Str<'a, T> {
        Self::from_units_in(units, None)
    }

    /// Creates a string holding a copy of `units`, drawn from `allocator`.
    pub fn from_units_in(units: &[T], allocator: Option<&'a dyn Allocator>) -> Str<'a, T> {
        let mut value = Self::with_allocator(allocator);
        value.assign(units);
        value
    }

    /// Creates a string by encoding `text` into this width's code units.
    pub fn from_text(text: &str) -> Str<'a, T> {
        let mut units = Vec::new();
        T::push_str(&mut units, text);
        Self::from_units(&units)
    }

    /// Renders `fmt` with printf-style conversions applied to `args`.
    ///
    /// See [`format`](crate::format) for the accepted conversions. Argument
    /// arity and kinds are checked against the format string in debug
    /// builds.
    pub fn format(fmt: &[T], args: &[Arg<'_>]) -> Result<Str<'a, T>> {
        crate::format::format(fmt, args)
    }

    /// [`format`](Str::format) with the format string given as `&str`.
    pub fn format_text(fmt: &str, args: &[Arg<'_>]) -> Result<Str<'a, T>> {
        let mut units = Vec::new();
        T::push_str(&mut units, fmt);
        crate::format::format(&units, args)
    }

    /// Number of units the backing buffer holds, terminator slot included.
    /// Zero for a string that owns no allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Logical length: the unit count before the first terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_units().len()
    }

    /// Returns `true` when the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The allocator this string was constructed with, if any.
    #[inline]
    pub fn allocator(&self) -> Option<&'a dyn Allocator> {
        self.buf.allocator()
    }

    /// The logical content, terminator excluded.
    pub fn as_units(&self) -> &[T] {
        let slice = self.buf.as_slice();
        let length = slice
            .iter()
            .position(|&unit| unit == T::NUL)
            .unwrap_or(slice.len());
        &slice[..length]
    }

    /// Raw pointer to the first unit; null for a string with no allocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Releases the allocation, leaving the string empty with zero capacity.
    pub fn clear(&mut self) {
        self.buf.free();
    }

    /// Ensures capacity for `length` units plus the terminator.
    ///
    /// When the current capacity already suffices this is a no-op and the
    /// string keeps its address, so content assigned afterwards (up to
    /// `length` units) will not move it. Growing reallocates and copies the
    /// logical content over.
    pub fn reserve(&mut self, length: usize) {
        let required = (length + 1) * std::mem::size_of::<T>();
        if required <= self.buf.size() {
            return;
        }
        let mut grown = Buffer::zeroed_in(required, self.buf.allocator());
        if !grown.is_empty() {
            let keep = self.len().min(length);
            grown.as_mut_slice()[..keep].copy_from_slice(&self.as_units()[..keep]);
        }
        std::mem::swap(&mut self.buf, &mut grown);
    }

    /// Replaces the content with a copy of `units`, reusing the allocation
    /// when it is large enough.
    pub fn assign(&mut self, units: &[T]) {
        self.reserve(units.len());
        if self.capacity() > units.len() {
            let target = self.buf.as_mut_slice();
            target[..units.len()].copy_from_slice(units);
            target[units.len()] = T::NUL;
        }
    }

    /// Appends `units` after the current content, growing only when the
    /// capacity is exceeded.
    pub fn append(&mut self, units: &[T]) {
        if units.is_empty() {
            return;
        }
        let length = self.len();
        let total = length + units.len();
        self.reserve(total);
        if self.capacity() > total {
            let target = self.buf.as_mut_slice();
            target[length..total].copy_from_slice(units);
            target[total] = T::NUL;
        }
    }

    /// Appends a single unit.
    pub fn push(&mut self, unit: T) {
        self.append(&[unit]);
    }

    /// Position of the first occurrence of `what`, searching from the start.
    /// An empty needle is found at position 0.
    pub fn find(&self, what: &[T]) -> Option<usize> {
        self.find_from(what, 0)
    }

    /// Position of the first occurrence of `what` at or after `from`.
    pub fn find_from(&self, what: &[T], from: usize) -> Option<usize> {
        if what.is_empty() {
            return Some(0);
        }
        let content = self.as_units();
        if from > content.len() {
            return None;
        }
        content[from..]
            .windows(what.len())
            .position(|window| window == what)
            .map(|position| position + from)
    }

    /// Position of the last occurrence of `what`. An empty needle is found
    /// at position 0.
    pub fn find_last(&self, what: &[T]) -> Option<usize> {
        if what.is_empty() {
            return Some(0);
        }
        let content = self.as_units();
        if content.len() < what.len() {
            return None;
        }
        (0..=content.len() - what.len()).rev().find(|&position| {
            content[position..position + what.len()] == *what
        })
    }

    /// Replaces every occurrence of `what` with `with`.
    ///
    /// The scan resumes past each substituted replacement, so a replacement
    /// that contains the needle is never rescanned. An empty needle is a
    /// no-op.
    pub fn replace(&mut self, what: &[T], with: &[T]) {
        if what.is_empty() {
            return;
        }
        let mut position = self.find(what);
        while let Some(found) = position {
            self.do_replace(found, what.len(), with);
            position = self.find_from(what, found + with.len());
        }
    }

    /// Replaces the span `[from, to)` with `with`. Both bounds must lie
    /// within the capacity and must not cross.
    pub fn replace_range(&mut self, from: usize, to: usize, with: &[T]) -> Result<()> {
        let capacity = self.capacity();
        if from >= capacity {
            return Err(Error::out_of_range("from", from, capacity));
        }
        if to > capacity {
            return Err(Error::out_of_range("to", to, capacity));
        }
        if to < from {
            return Err(Error::out_of_range("to", to, from));
        }
        self.do_replace(from, to - from, with);
        Ok(())
    }

    /// Replaces everything from `from` to the end with `with`. A `from`
    /// past the logical length is a silent no-op.
    pub fn replace_from(&mut self, from: usize, with: &[T]) {
        let length = self.len();
        if from > length {
            return;
        }
        self.do_replace(from, length - from, with);
    }

    /// Substitutes `with` for the `what_len` units at `from`, shifting the
    /// suffix in place when the capacity allows and reallocating otherwise.
    fn do_replace(&mut self, from: usize, what_len: usize, with: &[T]) {
        let length = self.len();
        let from = from.min(length);
        let cut_end = (from + what_len).min(length);
        let required = from + with.len() + (length - cut_end);

        if required + 1 > self.capacity() {
            let mut grown = Self::with_capacity_in(required, self.buf.allocator());
            if grown.capacity() > required {
                let source = self.buf.as_slice();
                let target = grown.buf.as_mut_slice();
                target[..from].copy_from_slice(&source[..from]);
                target[from..from + with.len()].copy_from_slice(with);
                target[from + with.len()..required].copy_from_slice(&source[cut_end..length]);
            }
            // On allocation failure `grown` is empty and the content is
            // dropped, same as any other exhausted mutation.
            std::mem::swap(self, &mut grown);
        } else {
            let target = self.buf.as_mut_slice();
            target.copy_within(cut_end..length, from + with.len());
            target[from..from + with.len()].copy_from_slice(with);
            target[required] = T::NUL;
        }
    }

    /// Matches the content against `wildcard`, where `*` spans any run of
    /// units (including none), `?` consumes exactly one, and literal units
    /// compare case-insensitively. An empty string matches `*` and the
    /// empty wildcard.
    pub fn matches(&self, wildcard: &[T]) -> bool {
        let star = T::from_ascii(b'*');
        let question = T::from_ascii(b'?');
        let unit_eq =
            |w: T, s: T| w == question || w == s || w.to_lower() == s.to_lower();

        let text = self.as_units();
        let mut t = 0;
        let mut w = 0;

        // Literal prefix before the first star must match directly.
        while t < text.len() && w < wildcard.len() && wildcard[w] != star {
            if !unit_eq(wildcard[w], text[t]) {
                return false;
            }
            w += 1;
            t += 1;
        }

        // Two-pointer scan: remember the unit after the last star and the
        // text position it was tried at, and back up there on a mismatch.
        let mut mark = None;
        let mut checkpoint = 0;
        while t < text.len() {
            if w < wildcard.len() && wildcard[w] == star {
                w += 1;
                if w == wildcard.len() {
                    return true;
                }
                mark = Some(w);
                checkpoint = t + 1;
            } else if w < wildcard.len() && unit_eq(wildcard[w], text[t]) {
                w += 1;
                t += 1;
            } else {
                match mark {
                    Some(marked) => {
                        w = marked;
                        t = checkpoint;
                        checkpoint += 1;
                    }
                    None => return false,
                }
            }
        }

        // Only trailing stars may remain once the text is consumed.
        while w < wildcard.len() && wildcard[w] == star {
            w += 1;
        }
        w == wildcard.len()
    }

    /// Cuts the next `by`-delimited token starting at `*from` and advances
    /// `*from` past the delimiter.
    ///
    /// Adjacent delimiters yield empty tokens. Returns `None` once `*from`
    /// reaches the logical length, or when `by` is empty. Tokens are
    /// heap-backed copies.
    pub fn split_next(&self, by: &[T], from: &mut usize) -> Option<Str<'a, T>> {
        if by.is_empty() || *from >= self.len() {
            return None;
        }
        match self.find_from(by, *from) {
            Some(position) => {
                let token = Self::from_units(&self.as_units()[*from..position]);
                *from = position + by.len();
                Some(token)
            }
            None => {
                let token = Self::from_units(&self.as_units()[*from..]);
                *from = self.len() + by.len();
                Some(token)
            }
        }
    }

    /// Splits the content on `by`, collecting the non-empty tokens.
    pub fn split(&self, by: &[T]) -> Vec<Str<'a, T>> {
        let mut tokens = Vec::new();
        let mut from = 0;
        while let Some(token) = self.split_next(by, &mut from) {
            if !token.is_empty() {
                tokens.push(token);
            }
        }
        tokens
    }

    /// Removes leading units found in `charset`. An empty charset is a
    /// no-op.
    pub fn trim_start(&mut self, charset: &[T]) {
        if charset.is_empty() {
            return;
        }
        let length = self.len();
        let skip = {
            let content = self.as_units();
            content
                .iter()
                .position(|unit| !charset.contains(unit))
                .unwrap_or(length)
        };
        if skip == 0 {
            return;
        }
        let target = self.buf.as_mut_slice();
        target.copy_within(skip..length, 0);
        target[length - skip] = T::NUL;
    }

    /// Removes trailing units found in `charset`. An empty charset is a
    /// no-op.
    pub fn trim_end(&mut self, charset: &[T]) {
        if charset.is_empty() {
            return;
        }
        let length = self.len();
        let keep = self
            .as_units()
            .iter()
            .rposition(|unit| !charset.contains(unit))
            .map_or(0, |position| position + 1);
        if keep < length {
            self.buf.as_mut_slice()[keep] = T::NUL;
        }
    }

    /// Removes leading and trailing units found in `charset`.
    pub fn trim(&mut self, charset: &[T]) {
        self.trim_start(charset);
        self.trim_end(charset);
    }

    /// Returns `true` when the content starts with `what`. Vacuously true
    /// for an empty needle.
    pub fn begins_with(&self, what: &[T]) -> bool {
        self.as_units().starts_with(what)
    }

    /// Returns `true` when the content ends with `what`. Vacuously true for
    /// an empty needle.
    pub fn ends_with(&self, what: &[T]) -> bool {
        self.as_units().ends_with(what)
    }

    /// Returns `true` when the content contains `what`. Vacuously true for
    /// an empty needle.
    pub fn contains(&self, what: &[T]) -> bool {
        self.find(what).is_some()
    }

    /// Copies out the span starting at `from`, heap-backed.
    ///
    /// With `length` of `None` the span runs to the terminator found at or
    /// after `from`; an explicit length is clamped to the capacity. `from`
    /// may address the slack between the logical length and the capacity
    /// (yielding an empty result), but not beyond it.
    pub fn substring(&self, from: usize, length: Option<usize>) -> Result<Str<'a, T>> {
        let available = self.capacity().saturating_sub(1);
        if from > available {
            return Err(Error::out_of_range("from", from, available));
        }
        let slice = self.buf.as_slice();
        let run = slice[from..]
            .iter()
            .position(|&unit| unit == T::NUL)
            .unwrap_or(available - from);
        let length = length.unwrap_or(run).min(available - from);
        Ok(Self::from_units(&slice[from..from + length]))
    }

    /// Folds the content to lowercase in place, unit by unit.
    pub fn make_lower(&mut self) {
        let length = self.len();
        for unit in &mut self.buf.as_mut_slice()[..length] {
            *unit = unit.to_lower();
        }
    }

    /// Folds the content to uppercase in place, unit by unit.
    pub fn make_upper(&mut self) {
        let length = self.len();
        for unit in &mut self.buf.as_mut_slice()[..length] {
            *unit = unit.to_upper();
        }
    }

    /// Lowercase copy of this string.
    pub fn to_lower(&self) -> Str<'a, T> {
        let mut copy = self.clone();
        copy.make_lower();
        copy
    }

    /// Uppercase copy of this string.
    pub fn to_upper(&self) -> Str<'a, T> {
        let mut copy = self.clone();
        copy.make_upper();
        copy
    }
}

impl<'a, T: CodeUnit> Default for Str<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: CodeUnit> From<&str> for Str<'a, T> {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl<T: CodeUnit> PartialEq for Str<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_units() == other.as_units()
    }
}

impl<T: CodeUnit> Eq for Str<'_, T> {}

impl<T: CodeUnit> PartialEq<[T]> for Str<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_units() == other
    }
}

impl<T: CodeUnit> PartialEq<&[T]> for Str<'_, T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_units() == *other
    }
}

impl PartialEq<&str> for Str<'_, u8> {
    fn eq(&self, other: &&str) -> bool {
        self.as_units() == other.as_bytes()
    }
}

impl PartialEq<&str> for Str<'_, u16> {
    fn eq(&self, other: &&str) -> bool {
        self.as_units().iter().copied().eq(other.encode_utf16())
    }
}

impl<T: CodeUnit> PartialOrd for Str<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CodeUnit> Ord for Str<'_, T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_units().cmp(other.as_units())
    }
}

impl<T: CodeUnit> fmt::Debug for Str<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Str")
            .field("units", &self.as_units())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl fmt::Display for Str<'_, u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_units()))
    }
}

impl fmt::Display for Str<'_, u16> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf16_lossy(self.as_units()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_alloc::StackAllocator;

    #[test]
    fn test_str_empty() {
        let value = Utf8Str::new();
        assert!(value.is_empty());
        assert_eq!(value.len(), 0);
        assert_eq!(value.capacity(), 0);
        assert!(value.as_ptr().is_null());
        assert_eq!(value, "");
    }

    #[test]
    fn test_str_with_capacity() {
        let value = Utf8Str::with_capacity(15);
        assert!(value.is_empty());
        assert_eq!(value.capacity(), 16);
    }

    #[test]
    fn test_str_from_text() {
        let value = Utf8Str::from_text("Something");
        assert_eq!(value.len(), 9);
        assert_eq!(value.capacity(), 10);
        assert_eq!(value, "Something");
        assert_ne!(value, "Something else");
    }

    #[test]
    fn test_str_length_stops_at_terminator() {
        let value = Utf8Str::from_units(b"abc\0def");
        assert_eq!(value.capacity(), 8);
        assert_eq!(value.len(), 3);
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_str_reserve_pins_address() {
        let mut value = Utf8Str::new();
        value.reserve(9);
        let address = value.as_ptr();
        assert_eq!(value.capacity(), 10);

        value.assign(b"something");
        assert_eq!(value.as_ptr(), address);
        assert_eq!(value, "something");

        value.assign(b"short");
        assert_eq!(value.as_ptr(), address);
        assert_eq!(value, "short");
    }

    #[test]
    fn test_str_reserve_growth_preserves_content() {
        let mut value = Utf8Str::from_text("keep me");
        value.reserve(100);
        assert_eq!(value.capacity(), 101);
        assert_eq!(value, "keep me");
    }

    #[test]
    fn test_str_assign_and_append() {
        let mut value = Utf8Str::new();
        value.assign(b"Hello");
        value.append(b", World");
        value.push(b'!');
        assert_eq!(value, "Hello, World!");

        value.append(b"");
        assert_eq!(value, "Hello, World!");
    }

    #[test]
    fn test_str_append_within_capacity_keeps_address() {
        let mut value = Utf8Str::with_capacity(16);
        value.assign(b"abc");
        let address = value.as_ptr();
        value.append(b"defgh");
        assert_eq!(value.as_ptr(), address);
        assert_eq!(value, "abcdefgh");
    }

    #[test]
    fn test_str_clear() {
        let mut value = Utf8Str::from_text("data");
        value.clear();
        assert!(value.is_empty());
        assert_eq!(value.capacity(), 0);
        assert!(value.as_ptr().is_null());
    }

    #[test]
    fn test_str_find() {
        let value = Utf8Str::from_text("one two one");
        assert_eq!(value.find(b"one"), Some(0));
        assert_eq!(value.find(b"two"), Some(4));
        assert_eq!(value.find_from(b"one", 1), Some(8));
        assert_eq!(value.find_last(b"one"), Some(8));
        assert_eq!(value.find(b"three"), None);
        assert_eq!(value.find(b""), Some(0));
        assert_eq!(value.find_from(b"one", 100), None);
    }

    #[test]
    fn test_str_find_on_empty() {
        let value = Utf8Str::new();
        assert_eq!(value.find(b""), Some(0));
        assert_eq!(value.find(b"x"), None);
    }

    #[test]
    fn test_str_replace_same_length() {
        let mut value = Utf8Str::from_text("a cat and a cat");
        let address = value.as_ptr();
        value.replace(b"cat", b"dog");
        assert_eq!(value, "a dog and a dog");
        assert_eq!(value.as_ptr(), address);
    }

    #[test]
    fn test_str_replace_shorter() {
        let mut value = Utf8Str::from_text("one, two, three");
        let address = value.as_ptr();
        value.replace(b", ", b"/");
        assert_eq!(value, "one/two/three");
        assert_eq!(value.as_ptr(), address);
    }

    #[test]
    fn test_str_replace_longer_grows() {
        let mut value = Utf8Str::from_text("a-b-c");
        value.replace(b"-", b" :: ");
        assert_eq!(value, "a :: b :: c");
    }

    #[test]
    fn test_str_replace_is_not_reentrant() {
        let mut value = Utf8Str::from_text("C:\\Windows\\regedit.exe");
        value.replace(b"C:\\Windows", b"C:\\Windows\\SysWOW64");
        assert_eq!(value, "C:\\Windows\\SysWOW64\\regedit.exe");
    }

    #[test]
    fn test_str_replace_empty_needle_is_noop() {
        let mut value = Utf8Str::from_text("data");
        value.replace(b"", b"x");
        assert_eq!(value, "data");
    }

    #[test]
    fn test_str_replace_range() {
        let mut value = Utf8Str::from_text("0123456789");
        value.replace_range(2, 5, b"x").unwrap();
        assert_eq!(value, "01x56789");

        let capacity = value.capacity();
        let err = value.replace_range(capacity, capacity, b"x").unwrap_err();
        assert!(matches!(
            err.kind(),
            strata_common::error::ErrorKind::OutOfRange { .. }
        ));
        let err = value.replace_range(5, 2, b"x").unwrap_err();
        assert!(matches!(
            err.kind(),
            strata_common::error::ErrorKind::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_str_replace_from() {
        let mut value = Utf8Str::from_text("name=value");
        value.replace_from(5, b"other");
        assert_eq!(value, "name=other");

        value.replace_from(1000, b"ignored");
        assert_eq!(value, "name=other");
    }

    #[test]
    fn test_str_matches_wildcards() {
        let value = Utf8Str::from_text("SomeMask_1234.zzz");
        assert!(value.matches(b"*"));
        assert!(value.matches(b"*.*"));
        assert!(value.matches(b"SomeMask_????.zzz"));
        assert!(value.matches(b"*.zzz"));
        assert!(value.matches(b"Some*"));
        assert!(value.matches(b"*Mask*"));
        assert!(!value.matches(b"SomeMask_??.zzz"));
        assert!(!value.matches(b"*.yyy"));
        assert!(!value.matches(b""));
    }

    #[test]
    fn test_str_matches_is_case_insensitive() {
        let value = Utf8Str::from_text("SomeMask_1234.zzz");
        assert!(value.matches(b"somemask*"));
        assert!(value.matches(b"SOMEMASK_????.ZZZ"));
    }

    #[test]
    fn test_str_matches_empty_text() {
        let value = Utf8Str::new();
        assert!(value.matches(b"*"));
        assert!(value.matches(b""));
        assert!(value.matches(b"**"));
        assert!(!value.matches(b"?"));
        assert!(!value.matches(b"a"));
    }

    #[test]
    fn test_str_split_next_keeps_empty_tokens() {
        let value = Utf8Str::from_text("A|B||D");
        let mut from = 0;
        let mut tokens = Vec::new();
        while let Some(token) = value.split_next(b"|", &mut from) {
            tokens.push(token);
        }
        assert_eq!(tokens, [
            Utf8Str::from_text("A"),
            Utf8Str::from_text("B"),
            Utf8Str::from_text(""),
            Utf8Str::from_text("D"),
        ]);
    }

    #[test]
    fn test_str_split_skips_empty_tokens() {
        let value = Utf8Str::from_text("A|B||D");
        let tokens = value.split(b"|");
        assert_eq!(tokens, [
            Utf8Str::from_text("A"),
            Utf8Str::from_text("B"),
            Utf8Str::from_text("D"),
        ]);
    }

    #[test]
    fn test_str_split_edge_cases() {
        let value = Utf8Str::from_text("A|");
        let mut from = 0;
        assert_eq!(value.split_next(b"|", &mut from), Some(Utf8Str::from_text("A")));
        assert_eq!(value.split_next(b"|", &mut from), None);

        // An empty delimiter never yields a token.
        let mut from = 0;
        assert_eq!(value.split_next(b"", &mut from), None);

        let empty = Utf8Str::new();
        assert!(empty.split(b"|").is_empty());
    }

    #[test]
    fn test_str_trim() {
        let mut value = Utf8Str::from_text("  \tdata\t  ");
        value.trim(b" \t");
        assert_eq!(value, "data");

        let mut all_whitespace = Utf8Str::from_text("   ");
        all_whitespace.trim(b" ");
        assert!(all_whitespace.is_empty());

        let mut untouched = Utf8Str::from_text("  data  ");
        untouched.trim(b"");
        assert_eq!(untouched, "  data  ");
    }

    #[test]
    fn test_str_trim_one_side() {
        let mut value = Utf8Str::from_text("--data--");
        value.trim_start(b"-");
        assert_eq!(value, "data--");
        value.trim_end(b"-");
        assert_eq!(value, "data");
    }

    #[test]
    fn test_str_affixes() {
        let value = Utf8Str::from_text("prefix.middle.suffix");
        assert!(value.begins_with(b"prefix"));
        assert!(!value.begins_with(b"suffix"));
        assert!(value.ends_with(b"suffix"));
        assert!(!value.ends_with(b"prefix"));
        assert!(value.contains(b".middle."));
        assert!(!value.contains(b"missing"));
        assert!(value.begins_with(b""));
        assert!(value.ends_with(b""));
        assert!(value.contains(b""));
    }

    #[test]
    fn test_str_substring() {
        let value = Utf8Str::from_text("Hello, World!");
        assert_eq!(value.substring(7, Some(5)).unwrap(), "World");
        assert_eq!(value.substring(7, None).unwrap(), "World!");
        assert_eq!(value.substring(0, Some(1000)).unwrap(), "Hello, World!");
        assert!(value.substring(1000, None).is_err());
    }

    #[test]
    fn test_str_substring_of_empty() {
        let value = Utf8Str::new();
        assert_eq!(value.substring(0, None).unwrap(), "");
        assert!(value.substring(1, None).is_err());
    }

    #[test]
    fn test_str_case_folding() {
        let mut value = Utf8Str::from_text("MiXeD 123");
        value.make_lower();
        assert_eq!(value, "mixed 123");
        value.make_upper();
        assert_eq!(value, "MIXED 123");

        let original = Utf8Str::from_text("AbC");
        assert_eq!(original.to_lower(), "abc");
        assert_eq!(original.to_upper(), "ABC");
        assert_eq!(original, "AbC");
    }

    #[test]
    fn test_str_ordering() {
        let a = Utf8Str::from_text("alpha");
        let b = Utf8Str::from_text("beta");
        assert!(a < b);
        assert_eq!(a, Utf8Str::from_text("alpha"));
        assert_eq!(Utf8Str::new(), Utf8Str::from_text(""));
    }

    #[test]
    fn test_str_wide_basics() {
        let mut value = Utf16Str::from_text("Wide Привет");
        assert_eq!(value, "Wide Привет");
        value.make_upper();
        assert_eq!(value, "WIDE ПРИВЕТ");
        assert!(value.begins_with(&[0x57, 0x49, 0x44, 0x45]));
    }

    #[test]
    fn test_str_wide_find_and_replace() {
        let mut value = Utf16Str::from_text("a.b.c");
        let dot: Vec<u16> = ".".encode_utf16().collect();
        let dash: Vec<u16> = "-".encode_utf16().collect();
        assert_eq!(value.find(&dot), Some(1));
        value.replace(&dot, &dash);
        assert_eq!(value, "a-b-c");
    }

    #[test]
    fn test_str_in_stack_arena() {
        let arena = StackAllocator::<64>::new();
        let mut value = Utf8Str::with_capacity_in(15, Some(&arena));
        value.assign(b"arena resident");
        assert_eq!(value, "arena resident");
        assert_eq!(arena.capacity(), 48);
    }

    #[test]
    fn test_str_arena_exhaustion_leaves_empty() {
        let arena = StackAllocator::<16>::new();
        let mut value = Utf8Str::with_allocator(Some(&arena));
        value.assign(b"0123456789abcdefXYZ");
        assert!(value.is_empty());
        assert_eq!(value.capacity(), 0);
    }

    #[test]
    fn test_str_display() {
        let narrow = Utf8Str::from_text("shown");
        assert_eq!(narrow.to_string(), "shown");
        let wide = Utf16Str::from_text("широко");
        assert_eq!(wide.to_string(), "широко");
    }
}
