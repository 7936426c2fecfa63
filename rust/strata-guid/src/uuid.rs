//! Version 4 (random) UUIDs.

use std::fmt;
use std::hash::{Hash, Hasher};

use strata_bytes::Bytes;
use strata_common::{Result, error::Error};
use strata_text::Utf8Str;

use crate::hex;

/// A 16-byte universally unique identifier.
///
/// [`generate`](Uuid::generate) produces random identifiers stamped as
/// version 4 with the standard variant bits. The textual form is the usual
/// lowercase `8-4-4-4-12` hyphenated hex; [`parse`](Uuid::parse) also
/// accepts the 32-digit form without hyphens.
pub struct Uuid {
    bytes: Bytes<'static>,
}

impl Uuid {
    /// Identifier size in bytes.
    pub const SIZE: usize = 16;

    /// Length of the hyphenated textual form.
    pub const HEX_LENGTH: usize = 36;

    const VERSION: u8 = 4;
    const VARIANT: u8 = 0b10;

    /// The all-zero identifier.
    pub fn nil() -> Uuid {
        Uuid {
            bytes: Bytes::zeroed(Self::SIZE),
        }
    }

    /// Generates a random identifier.
    pub fn generate() -> Uuid {
        let mut bytes = Bytes::zeroed(Self::SIZE);
        let raw = bytes.as_bytes_mut();
        raw[..8].copy_from_slice(&fastrand::u64(..).to_le_bytes());
        raw[8..].copy_from_slice(&fastrand::u64(..).to_le_bytes());
        raw[6] = (raw[6] & 0x0F) | (Self::VERSION << 4);
        raw[8] = (raw[8] & 0x3F) | (Self::VARIANT << 6);
        Uuid { bytes }
    }

    /// Builds an identifier from exactly [`SIZE`](Uuid::SIZE) raw bytes.
    pub fn from_bytes(raw: &[u8]) -> Result<Uuid> {
        strata_common::verify_arg!(raw, raw.len() == Uuid::SIZE);
        Ok(Uuid {
            bytes: Bytes::from_slice(raw),
        })
    }

    /// Parses the hyphenated (36 characters) or plain (32 digits) hex form.
    pub fn parse(text: &[u8]) -> Result<Uuid> {
        let mut digits = Vec::with_capacity(Self::SIZE * 2);
        match text.len() {
            36 => {
                for (position, &byte) in text.iter().enumerate() {
                    if matches!(position, 8 | 13 | 18 | 23) {
                        if byte != b'-' {
                            return Err(Error::conversion("uuid", "misplaced separator"));
                        }
                    } else {
                        digits.push(byte);
                    }
                }
            }
            32 => digits.extend_from_slice(text),
            other => {
                return Err(Error::conversion(
                    "uuid",
                    format!("unexpected length {other}"),
                ));
            }
        }
        Ok(Uuid {
            bytes: hex::parse_hex(&digits)?,
        })
    }

    /// The raw bytes, network order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    /// Returns `true` for the all-zero identifier.
    pub fn is_nil(&self) -> bool {
        self.as_bytes().iter().all(|&byte| byte == 0)
    }

    /// The version field (4 for generated identifiers).
    pub fn version(&self) -> u8 {
        self.as_bytes()[6] >> 4
    }

    /// The variant field (`0b10` for generated identifiers).
    pub fn variant(&self) -> u8 {
        self.as_bytes()[8] >> 6
    }

    /// Renders the hyphenated lowercase hex form.
    pub fn to_hex(&self) -> Utf8Str<'static> {
        let raw = self.as_bytes();
        let mut out = Utf8Str::with_capacity(Self::HEX_LENGTH);
        for (index, group) in [0..4, 4..6, 6..8, 8..10, 10..16].into_iter().enumerate() {
            if index > 0 {
                out.push(b'-');
            }
            out.append(hex::to_hex(&raw[group]).as_units());
        }
        out
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::nil()
    }
}

impl Clone for Uuid {
    fn clone(&self) -> Uuid {
        Uuid {
            bytes: self.bytes.clone(),
        }
    }
}

impl From<[u8; Uuid::SIZE]> for Uuid {
    fn from(raw: [u8; Uuid::SIZE]) -> Uuid {
        Uuid {
            bytes: Bytes::from_slice(&raw),
        }
    }
}

impl std::str::FromStr for Uuid {
    type Err = Error;

    fn from_str(text: &str) -> Result<Uuid> {
        Self::parse(text.as_bytes())
    }
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Uuid {}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uuid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for Uuid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_common::error::ErrorKind;

    #[test]
    fn test_uuid_nil() {
        let nil = Uuid::nil();
        assert!(nil.is_nil());
        assert_eq!(nil.version(), 0);
        assert_eq!(nil.to_hex(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(nil, Uuid::default());
    }

    #[test]
    fn test_uuid_generate() {
        let uuid = Uuid::generate();
        assert!(!uuid.is_nil());
        assert_eq!(uuid.version(), 4);
        assert_eq!(uuid.variant(), 0b10);
        assert_ne!(uuid, Uuid::generate());
    }

    #[test]
    fn test_uuid_hex_roundtrip() {
        let uuid = Uuid::generate();
        let hyphenated = uuid.to_hex();
        assert_eq!(hyphenated.len(), Uuid::HEX_LENGTH);
        let parsed = Uuid::parse(hyphenated.as_units()).unwrap();
        assert_eq!(parsed, uuid);
    }

    #[test]
    fn test_uuid_parse_forms() {
        let hyphenated = Uuid::parse(b"67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let plain = Uuid::parse(b"67e5504410b1426f9247bb680e5fe0c8").unwrap();
        assert_eq!(hyphenated, plain);
        assert_eq!(hyphenated.version(), 4);
        assert_eq!(
            hyphenated.as_bytes()[..4],
            [0x67, 0xE5, 0x50, 0x44]
        );
    }

    #[test]
    fn test_uuid_parse_rejects_bad_input() {
        let misplaced = Uuid::parse(b"67e5504410-b1-426f-9247-bb680e5fe0c8").unwrap_err();
        assert!(matches!(misplaced.kind(), ErrorKind::Conversion { .. }));
        let short = Uuid::parse(b"67e55044").unwrap_err();
        assert!(matches!(short.kind(), ErrorKind::Conversion { .. }));
        let bad_digit = Uuid::parse(b"67e55044-10b1-426f-9247-bb680e5fe0cz").unwrap_err();
        assert!(matches!(bad_digit.kind(), ErrorKind::Conversion { .. }));
    }

    #[test]
    fn test_uuid_from_bytes() {
        let raw = [7u8; 16];
        let uuid = Uuid::from_bytes(&raw).unwrap();
        assert_eq!(uuid.as_bytes(), &raw);
        assert_eq!(uuid, Uuid::from(raw));

        let err = Uuid::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_uuid_ordering() {
        let low = Uuid::from([0u8; 16]);
        let high = Uuid::from([0xFFu8; 16]);
        assert!(low < high);
        assert_eq!(low.cmp(&low), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_uuid_from_str() {
        let uuid: Uuid = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(uuid.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }
}
