//! The three-part firmware version embedded in every M8 file

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;
use ux::u4;

/// A `major.minor.patch` firmware version
///
/// Every M8 file starts with the version of the firmware that wrote it, and a lot of the
/// layout decisions further down the file depend on it: how many LFO's an instrument has,
/// whether FM operators store a shape, which filter types exist, and so on.
///
/// Each component is stored in four bits in the file header, which is why they're [`u4`]'s.
/// Versions are totally ordered: major first, then minor, then patch.
///
/// ```
/// # use m8::version::Version;
/// let version: Version = "2.7.0".parse()?;
/// assert!(version.at_least(&Version::LFO_PAIR));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u4,
    minor: u4,
    patch: u4,
}

impl Version {
    /// Instruments carry a second LFO from here on
    pub const LFO_PAIR: Self = Self::from_u4(1, 4, 0);

    /// FM synth operators store their oscillator shape from here on
    pub const FM_OPERATOR_SHAPES: Self = Self::from_u4(1, 4, 0);

    /// The four noise-based MacroSynth shapes were added
    pub const MACRO_NOISE_SHAPES: Self = Self::from_u4(2, 0, 0);

    /// Songs store their 16 scales after the MIDI mappings
    pub const SONG_SCALES: Self = Self::from_u4(2, 5, 0);

    /// The ZDF low-pass filter became available to every synth
    pub const ZDF_FILTER: Self = Self::from_u4(2, 5, 1);

    /// MIDI out instruments can target the internal port
    pub const MIDI_INTERNAL_PORT: Self = Self::from_u4(2, 6, 0);

    /// FM operators gained the filtered noise and click shapes
    pub const FM_NOISE_SHAPES: Self = Self::from_u4(2, 7, 0);

    /// The newest firmware this crate knows the layout of
    pub const LATEST: Self = Self::from_u4(3, 0, 0);

    const fn from_u4(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major: u4::new(major),
            minor: u4::new(minor),
            patch: u4::new(patch),
        }
    }

    /// Construct a version from its components
    ///
    /// Fails if any component does not fit in the four bits the header has room for.
    pub fn new(major: u8, minor: u8, patch: u8) -> Result<Self, VersionError> {
        for (component, value) in [("major", major), ("minor", minor), ("patch", patch)] {
            if value > Self::COMPONENT_MAX {
                return Err(VersionError::OutOfRange { component, value });
            }
        }

        Ok(Self::from_u4(major, minor, patch))
    }

    const COMPONENT_MAX: u8 = 0x0F;

    /// The major component
    pub fn major(&self) -> u8 {
        u8::from(self.major)
    }

    /// The minor component
    pub fn minor(&self) -> u8 {
        u8::from(self.minor)
    }

    /// The patch component
    pub fn patch(&self) -> u8 {
        u8::from(self.patch)
    }

    /// Compare two versions, major first, then minor, then patch
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Is this version the same as or newer than `other`?
    pub fn at_least(&self, other: &Self) -> bool {
        self.compare(other) != Ordering::Less
    }

    /// Unpack a version from the 16-bit header field
    ///
    /// The layout, from high to low bits, is `0000 MMMM mmmm pppp`. Any bits in the top
    /// nibble are ignored.
    pub fn from_packed(packed: u16) -> Self {
        let nibble = |shift: u16| u4::new(((packed >> shift) & 0x0F) as u8);

        Self {
            major: nibble(8),
            minor: nibble(4),
            patch: nibble(0),
        }
    }

    /// Pack the version into the 16-bit header field
    ///
    /// A zero component is always written as four zero bits. Because every component is
    /// exactly one nibble wide, no other value shares that pattern.
    pub fn packed(&self) -> u16 {
        (u16::from(self.major()) << 8) | (u16::from(self.minor()) << 4) | u16::from(self.patch())
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let mut components = str.trim().split('.');

        let mut next = |component: &'static str| -> Result<u8, VersionError> {
            let text = components
                .next()
                .filter(|text| !text.is_empty())
                .ok_or(VersionError::Missing { component })?;

            text.parse().map_err(|_| VersionError::NotNumeric {
                component,
                text: text.to_owned(),
            })
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;

        Self::new(major, minor, patch)
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Errors that might be returned constructing a [`Version`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// One of the three components wasn't provided
    #[error("The {component} version component is missing")]
    Missing { component: &'static str },

    /// A component could not be parsed as a number
    #[error("The {component} version component '{text}' is not a number")]
    NotNumeric { component: &'static str, text: String },

    /// A component doesn't fit in the four bits available in the file header
    #[error("The {component} version component {value} is larger than 15")]
    OutOfRange { component: &'static str, value: u8 },
}
