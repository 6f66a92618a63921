//! Tables: secondary 16-step effect sequences

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::hex_or_empty,
    fx::Fx,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A single row in a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStep {
    pub transpose: u8,
    pub volume: u8,
    pub fx: [Fx; 3],
}

impl TableStep {
    pub const EMPTY: Self = Self {
        transpose: 0,
        volume: 0xFF,
        fx: [Fx::EMPTY; 3],
    };

    pub fn volume_to_str(&self) -> String {
        hex_or_empty(self.volume)
    }
}

impl Default for TableStep {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for TableStep {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            transpose: reader.read_u8()?,
            volume: reader.read_u8()?,
            fx: reader.decode_array()?,
        })
    }
}

impl Encode for TableStep {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.transpose)?;
        writer.write_u8(self.volume)?;
        writer.encode(&self.fx)
    }
}

/// A 16-step effect sequence that runs alongside a note
///
/// Every instrument has a table of its own, and phrases can trigger any table through
/// the `TBL` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub steps: [TableStep; 16],
}

impl Table {
    /// The size of a table in a file
    pub const LEN: u64 = 16 * 8;

    /// Does the table do anything at all?
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|step| *step == TableStep::EMPTY)
    }
}

impl Decode for Table {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            steps: reader.decode_array()?,
        })
    }
}

impl Encode for Table {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.encode(&self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn layout() {
        let mut table = Table::default();
        assert!(table.is_empty());

        table.steps[1] = TableStep {
            transpose: 0x0C,
            volume: 0x40,
            fx: [
                Fx {
                    command: 0x12,
                    value: 0x03,
                },
                Fx::EMPTY,
                Fx::EMPTY,
            ],
        };
        assert!(!table.is_empty());
        assert_eq!(table.steps[0].volume_to_str(), "--");
        assert_eq!(table.steps[1].volume_to_str(), "40");

        let mut bytes = Vec::new();
        table
            .encode(&mut Writer::new(&mut bytes, Version::LATEST, 0))
            .unwrap();

        assert_eq!(bytes.len() as u64, Table::LEN);
        assert_eq!(&bytes[0..8], &[0, 0xFF, 0xFF, 0, 0xFF, 0, 0xFF, 0]);
        assert_eq!(&bytes[8..12], &[0x0C, 0x40, 0x12, 0x03]);
    }
}
