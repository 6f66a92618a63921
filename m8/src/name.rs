//! A null-terminated/length-restricted string based on printable ASCII
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    fmt,
    str::{self, FromStr},
};
use thiserror::Error;

/// A null-terminated/length-restricted string based on printable ASCII
///
/// Song names, instrument names, scale names, the song directory and sample paths are
/// all stored as fixed-width fields in M8 files. The text ends at the first `0x00` (or
/// `0xFF`, which unused memory on the device is filled with), or runs to the full width.
///
/// The maximum length isn't the same everywhere, which is why this struct is generic over
/// its length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Name<N> {
    // Replaces any unprintable byte found while decoding
    const REPLACEMENT_CHAR: u8 = b'?';

    /// Try to convert a byte slice to a name
    ///
    /// This function fails if the bytes are longer than the allowed length, or a
    /// non-printable character is found before the terminator.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FromBytesError> {
        if bytes.len() > N {
            return Err(FromBytesError::TooLong);
        }

        let mut dest = [0; N];
        for (index, byte) in bytes.iter().enumerate() {
            match *byte {
                byte if Self::is_byte_allowed(byte) => dest[index] = byte,
                0 => break,
                _ => return Err(FromBytesError::InvalidByte { byte: *byte, index }),
            }
        }

        Ok(Self { bytes: dest })
    }

    /// Convert a field read from a file to a name, without failing
    ///
    /// Bytes outside of printable ASCII are replaced by `?`. The device doesn't prevent
    /// them (sample paths come straight from the SD card), so this is not a decoding error.
    pub(crate) fn from_field(field: [u8; N]) -> Self {
        let mut bytes = [0; N];
        let mut replaced = 0;

        for (dest, byte) in bytes.iter_mut().zip(field) {
            match byte {
                0 | 0xFF => break,
                byte if Self::is_byte_allowed(byte) => *dest = byte,
                _ => {
                    *dest = Self::REPLACEMENT_CHAR;
                    replaced += 1;
                }
            }
        }

        if replaced > 0 {
            warn!("Replaced {replaced} unprintable byte(s) in a {N}-byte name field");
        }

        Self { bytes }
    }

    /// Access the underlying bytes that make up the name
    ///
    /// This includes any amount of 0's used for null-termination
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The maximal number of characters allowed in the name
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The number of characters up to the null-termination (or N)
    pub fn len(&self) -> usize {
        self.bytes.iter().position(|c| *c == 0).unwrap_or(N)
    }

    /// Are there _any_ characters in the name string?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to a [`prim@str`] slice
    pub fn as_str(&self) -> &str {
        // SAFETY: Safe, because every constructor only lets through printable ASCII,
        // which is per definition UTF8-safe.
        unsafe { str::from_utf8_unchecked(&self.bytes[..self.len()]) }
    }

    /// Is a specific byte within the subset of ASCII usable for name strings?
    pub fn is_byte_allowed(byte: u8) -> bool {
        (0x20..=0x7E).contains(&byte)
    }
}

impl<const N: usize> Default for Name<N> {
    fn default() -> Self {
        Self { bytes: [0; N] }
    }
}

impl<const N: usize> fmt::Display for Name<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for Name<N> {
    type Error = FromBytesError;

    #[inline]
    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl<'a, const N: usize> TryFrom<&'a str> for Name<N> {
    type Error = FromBytesError;

    #[inline]
    fn try_from(str: &'a str) -> Result<Self, Self::Error> {
        str.as_bytes().try_into()
    }
}

impl<const N: usize> FromStr for Name<N> {
    type Err = FromBytesError;

    #[inline]
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        str.try_into()
    }
}

impl<const N: usize> Serialize for Name<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Name<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Errors that can result from trying to convert a byte slice to a [`Name`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FromBytesError {
    /// Error case for when the source slice is too big to fit in the [`Name`] string
    #[error("The slice did not fit in the name array")]
    TooLong,

    /// Only printable ASCII characters are allowed in [`Name`] strings
    ///
    /// An invalid byte was found during conversion from bytes
    #[error("Byte {byte} at position {index} is not allowed as a name character")]
    InvalidByte { byte: u8, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes() {
        const HELLO: &str = "Hello M8";

        let name = Name::<12>::from_str(HELLO).expect("bytes rejected");
        assert_eq!(name.len(), 8);
        assert!(!name.is_empty());
        assert_eq!(name.as_str(), HELLO);
        assert_eq!(format!("{name}"), HELLO);

        assert_eq!(
            Name::<8>::from_str("123456789"),
            Err(FromBytesError::TooLong)
        );

        assert_eq!(
            Name::<8>::from_bytes(&[b'A', 0x07]),
            Err(FromBytesError::InvalidByte { byte: 7, index: 1 })
        );
    }

    #[test]
    fn from_field() {
        let name = Name::<6>::from_field([b'K', b'I', b'C', b'K', 0xFF, 0xFF]);
        assert_eq!(name.as_str(), "KICK");
        assert_eq!(name.bytes(), &[b'K', b'I', b'C', b'K', 0, 0]);

        let name = Name::<4>::from_field([b'A', 0xC3, b'B', 0]);
        assert_eq!(name.as_str(), "A?B");

        let name = Name::<3>::from_field(*b"ABC");
        assert_eq!(name.len(), 3);
    }

    #[test]
    fn default() {
        let name = Name::<8>::default();
        assert_eq!(name.len(), 0);
        assert!(name.is_empty());
        assert_eq!(name.as_str(), "");
    }
}
