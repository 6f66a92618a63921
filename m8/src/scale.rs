//! Scales: which notes are playable, and how they're tuned

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::NOTE_NAMES,
    name::Name,
    object::serde_projection,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A single note in a [`Scale`]
///
/// Besides being enabled or not, every note can be detuned. The detune offset is stored in
/// two bytes that, oddly, don't form a plain signed integer; see [`NoteInterval::offset()`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInterval {
    pub enabled: bool,
    pub offset_a: u8,
    pub offset_b: u8,
}

impl NoteInterval {
    /// Create an enabled note from a detune offset in cents
    ///
    /// The offset is split into its two's complement bytes.
    pub fn from_offset(offset: i16) -> Self {
        let [offset_a, offset_b] = offset.to_le_bytes();

        Self {
            enabled: true,
            offset_a,
            offset_b,
        }
    }

    /// The detune offset, in cents
    ///
    /// When `offset_a` is at least `offset_b` the bytes are read as an unsigned
    /// little-endian pair. Otherwise the high byte is taken as negative. Both branches are
    /// what the device does, so they are kept as is, even though negative offsets written
    /// by [`NoteInterval::from_offset()`] don't always read back the same.
    pub fn offset(&self) -> i32 {
        let a = i32::from(self.offset_a);
        let b = i32::from(self.offset_b);

        if a >= b { a + b * 256 } else { a + (b - 256) * 256 }
    }

    /// Render the offset as signed semitones and cents, e.g. `+01.50`
    pub fn offset_to_str(&self) -> String {
        let offset = self.offset();
        let sign = if offset < 0 { '-' } else { '+' };
        let offset = offset.unsigned_abs();

        format!("{sign}{:02}.{:02}", offset / 100, offset % 100)
    }
}

/// A named set of enabled and detuned notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub name: Name<16>,
    pub intervals: [NoteInterval; 12],
}

impl Scale {
    /// The size of a scale in a file
    pub const LEN: u64 = 42;

    /// The names of the enabled notes
    pub fn enabled_notes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.intervals
            .iter()
            .zip(NOTE_NAMES)
            .filter(|(interval, _)| interval.enabled)
            .map(|(_, note)| note)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            name: Name::default(),
            intervals: [NoteInterval {
                enabled: true,
                ..Default::default()
            }; 12],
        }
    }
}

impl Decode for Scale {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let enabled = reader.read_u16()?;

        let mut intervals = [NoteInterval::default(); 12];
        for (index, interval) in intervals.iter_mut().enumerate() {
            interval.enabled = enabled & (1 << index) != 0;
            interval.offset_a = reader.read_u8()?;
            interval.offset_b = reader.read_u8()?;
        }

        Ok(Self {
            name: reader.read_name()?,
            intervals,
        })
    }
}

impl Encode for Scale {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        let enabled = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, interval)| interval.enabled)
            .fold(0u16, |mask, (index, _)| mask | (1 << index));
        writer.write_u16(enabled)?;

        for interval in &self.intervals {
            writer.write_u8(interval.offset_a)?;
            writer.write_u8(interval.offset_b)?;
        }

        writer.write_name(&self.name)
    }
}

serde_projection!(Scale, ["name", "intervals"]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;
    use std::io::Cursor;

    #[test]
    fn offsets() {
        let interval = NoteInterval::from_offset(150);
        assert_eq!((interval.offset_a, interval.offset_b), (150, 0));
        assert_eq!(interval.offset(), 150);
        assert_eq!(interval.offset_to_str(), "+01.50");

        let interval = NoteInterval::from_offset(-50);
        assert_eq!((interval.offset_a, interval.offset_b), (0xCE, 0xFF));
        assert_eq!(interval.offset(), -50);
        assert_eq!(interval.offset_to_str(), "-00.50");
    }

    #[test]
    fn offsets_keep_the_asymmetric_rule() {
        // 0xFF/0xFF takes the unsigned branch, so -1 does not survive
        let interval = NoteInterval::from_offset(-1);
        assert_eq!(interval.offset(), 0xFFFF);

        let interval = NoteInterval {
            enabled: true,
            offset_a: 0x10,
            offset_b: 0x20,
        };
        assert_eq!(interval.offset(), 0x10 + (0x20 - 256) * 256);
    }

    #[test]
    fn layout() {
        let mut scale = Scale {
            name: "MAJOR".parse().unwrap(),
            ..Default::default()
        };
        for index in [1, 3, 6, 8, 10] {
            scale.intervals[index].enabled = false;
        }
        scale.intervals[4] = NoteInterval::from_offset(-14);

        assert_eq!(
            scale.enabled_notes().collect::<Vec<_>>(),
            vec!["C-", "D-", "E-", "F-", "G-", "A-", "B-"]
        );

        let mut bytes = Vec::new();
        scale
            .encode(&mut Writer::new(&mut bytes, Version::LATEST, 0))
            .unwrap();
        assert_eq!(bytes.len() as u64, Scale::LEN);
        assert_eq!(&bytes[..2], &0b1010_1011_0101u16.to_le_bytes());
        assert_eq!(&bytes[26..31], b"MAJOR");

        let decoded =
            Scale::decode(&mut Reader::new(Cursor::new(bytes), Version::LATEST, 0)).unwrap();
        assert_eq!(decoded, scale);
    }
}
