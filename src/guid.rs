use std::{fmt, str::FromStr};

use binrw::prelude::*;
use rand::{rngs::OsRng, Rng};

pub use crate::error::Error;
use crate::hex::parse_byte;

/// Represents a standard, 16-byte GUID.
///
/// Bytes are kept in string order: the first two characters of the
/// canonical form encode byte 0, and so on. The wire form is the same
/// 16 bytes, unmodified.
///
/// Supports [`std::mem::size_of`].
#[derive(BinRead, BinWrite, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[brw(big)]
pub struct Guid([u8; 16]);

impl Guid {
    /// The size of a GUID, in Bytes
    pub const GUID_SIZE: usize = 16;
    const _VALIDATE_SIZE_OF: [u8; Self::GUID_SIZE] = [0; size_of::<Self>()];

    pub const ZERO: Guid = Guid([0; 16]);

    /// The maximum possible GUID value (all bits set to 1).
    pub const MAX: Guid = Guid([u8::MAX; 16]);

    /// Generates a new random version 4 GUID.
    ///
    /// All 16 bytes are drawn from the operating system's secure random
    /// source, then the version nibble and variant bits are forced to
    /// their RFC 4122 values.
    ///
    /// # Panics
    ///
    /// If the secure random source cannot supply bytes. A degraded
    /// source is never substituted.
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40; // version 4
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // RFC 4122 variant
        let guid = Self(bytes);
        log::trace!("generated {guid}");
        guid
    }

    /// Returns true if `s` is a canonically formatted GUID string:
    /// exactly 36 characters, `-` at positions 8, 13, 18 and 23, and
    /// hex digits (either case) everywhere else.
    pub const fn is_valid(s: &str) -> bool {
        matches!(Self::parse(s), Ok(_))
    }

    /// Parses the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
    /// form. Accepts exactly the strings [`Guid::is_valid`] accepts;
    /// braced, dash-less and URN forms are rejected.
    pub const fn parse(s: &str) -> Result<Guid, Error> {
        let b = s.as_bytes();
        if b.len() != 36 {
            return Err(Error::InvalidFormat);
        }
        if b[8] != b'-' || b[13] != b'-' || b[18] != b'-' || b[23] != b'-' {
            return Err(Error::InvalidFormat);
        }
        let mut bytes = [0u8; 16];
        let mut i = 0; // position in the string
        let mut o = 0; // next output byte
        while o < Self::GUID_SIZE {
            if i == 8 || i == 13 || i == 18 || i == 23 {
                i += 1;
                continue;
            }
            bytes[o] = match parse_byte(b, i) {
                Ok(val) => val,
                Err(e) => return Err(e),
            };
            i += 2;
            o += 1;
        }
        Ok(Guid(bytes))
    }

    /// The version nibble (high nibble of byte 6).
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Determines whether the GUID is structurally RFC 4122-conformant:
    /// version within 1..=5 and the variant not in the reserved `111x`
    /// range. The check says nothing about where the value came from.
    pub const fn is_conformant(&self) -> bool {
        let version = self.version();
        if version < 1 || version > 5 {
            return false;
        }
        (self.0[8] & 0xe0) != 0xe0
    }

    /// Returns the raw bytes, in order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// A macro to create a `Guid` from a string literal at compile time.
///
#[macro_export]
macro_rules! guid {
    ($s:literal) => {{
        match $crate::Guid::parse($s) {
            Ok(guid) => guid,
            Err(_) => panic!("Invalid GUID format"),
        }
    }};
}

impl From<[u8; 16]> for Guid {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl From<Guid> for [u8; 16] {
    fn from(val: Guid) -> Self {
        val.0
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Guid::parse(s)
    }
}

impl fmt::LowerHex for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const TEST_GUID_STR: &str = "0e545c9c-6942-4988-fab0-645274cfaded";
    const PARSED_GUID_VALUE: Guid = Guid([
        14, 84, 92, 156, 105, 66, 73, 136, 250, 176, 100, 82, 116, 207, 173, 237,
    ]);
    const TEST_GUID_BYTES: [u8; 16] = [
        0x0eu8, 0x54, 0x5c, 0x9c, 0x69, 0x42, 0x49, 0x88, 0xfa, 0xb0, 0x64, 0x52, 0x74, 0xcf,
        0xad, 0xed,
    ];

    #[test]
    pub fn test_guid_parse_runtime() {
        let guid = TEST_GUID_STR.parse::<Guid>().unwrap();
        assert_eq!(guid, PARSED_GUID_VALUE);
        assert_eq!(guid.to_string(), TEST_GUID_STR);
    }

    #[test]
    pub fn test_const_guid() {
        const PARSED: Guid = guid!("0e545c9c-6942-4988-fab0-645274cfaded");
        assert_eq!(PARSED, PARSED_GUID_VALUE);
    }

    #[test]
    pub fn test_guid_parse_mixed_case() {
        let upper = "3D7670FF-48CC-42D3-91E4-B09177487D0C".parse::<Guid>().unwrap();
        let lower = "3d7670ff-48cc-42d3-91e4-b09177487d0c".parse::<Guid>().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(
            *upper.as_bytes(),
            [61, 118, 112, 255, 72, 204, 66, 211, 145, 228, 176, 145, 119, 72, 125, 12]
        );
    }

    #[test]
    pub fn test_guid_parse_bytes() {
        assert_eq!(Guid::from(TEST_GUID_BYTES), PARSED_GUID_VALUE);
    }

    #[test]
    pub fn test_guid_read_bytes() {
        let mut cursor = Cursor::new(&TEST_GUID_BYTES);
        assert_eq!(Guid::read(&mut cursor).unwrap(), PARSED_GUID_VALUE);
    }

    #[test]
    pub fn test_guid_write_bytes() {
        let mut cursor = Cursor::new(Vec::new());
        PARSED_GUID_VALUE.write(&mut cursor).unwrap();
        assert_eq!(cursor.into_inner(), TEST_GUID_BYTES);
    }

    #[test]
    pub fn test_guid_format_upper() {
        assert_eq!(
            format!("{PARSED_GUID_VALUE:X}"),
            "0E545C9C-6942-4988-FAB0-645274CFADED"
        );
        assert_eq!(format!("{PARSED_GUID_VALUE:x}"), TEST_GUID_STR);
    }

    #[test]
    pub fn test_guid_version() {
        assert_eq!(PARSED_GUID_VALUE.version(), 4);
        assert_eq!(Guid::ZERO.version(), 0);
    }

    #[test]
    pub fn test_guid_conformance_bounds() {
        // version 0 and versions above 5 are out of range
        assert!(!Guid::ZERO.is_conformant());
        assert!(!guid!("0e545c9c-6942-6988-8ab0-645274cfaded").is_conformant());
        // reserved variant (top three bits set)
        assert!(!guid!("0e545c9c-6942-4988-eab0-645274cfaded").is_conformant());
        // versions 1 and 5 are the inclusive edges
        assert!(guid!("0e545c9c-6942-1988-8ab0-645274cfaded").is_conformant());
        assert!(guid!("0e545c9c-6942-5988-8ab0-645274cfaded").is_conformant());
    }
}
