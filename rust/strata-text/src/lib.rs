//! Null-terminated strings over 8-bit and 16-bit code units.
//!
//! [`Str`] layers length semantics on top of [`strata_bytes::Buffer`]: the
//! buffer's byte size is the *capacity*, while the *logical length* is the
//! code-unit count before the first terminator. A non-empty string always
//! keeps one terminator unit of capacity reserved beyond its content, and
//! mutations that fit within capacity never reallocate, so callers can
//! pre-size a string once and mutate it in place afterwards.
//!
//! The per-code-unit behavior (terminators, case mapping, wildcard
//! metacharacters, text widening) lives in the [`unit::CodeUnit`] trait with
//! fixed instantiations for `u8` and `u16`.

pub mod convert;
pub mod format;
pub mod string;
pub mod unit;

pub use format::Arg;
pub use string::{Str, Utf8Str, Utf16Str};
pub use unit::CodeUnit;
