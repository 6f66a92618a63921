//! Effect commands, as found in phrases and tables

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display,
    instrument::InstrumentKind,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A single (command, value) effect slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fx {
    pub command: u8,
    pub value: u8,
}

impl Fx {
    /// An unused effect slot
    pub const EMPTY: Self = Self {
        command: 0xFF,
        value: 0x00,
    };

    /// The first command byte that belongs to an instrument instead of the sequencer
    pub const INSTRUMENT_COMMANDS_START: u8 = 0x80;

    /// The `TBL` command, which triggers a table
    pub const TABLE_COMMAND: u8 = 0x12;

    /// Is this slot unused?
    pub fn is_empty(&self) -> bool {
        self.command == Self::EMPTY.command
    }

    /// Render the command mnemonic
    ///
    /// Commands below `0x80` are shared by every instrument. From `0x80` upwards they
    /// depend on the kind of instrument playing the step, which is why it needs to be
    /// passed in. `None` means that no instrument could be found, and every instrument
    /// command renders as unknown. Unknown commands render as their hex value followed
    /// by a question mark.
    pub fn command_to_str(&self, kind: Option<InstrumentKind>) -> String {
        if self.is_empty() {
            return "---".to_owned();
        }

        let name = match self.command.checked_sub(Self::INSTRUMENT_COMMANDS_START) {
            None => SEQUENCER_COMMANDS.get(self.command as usize),
            Some(index) => kind.and_then(|kind| kind.command_table().get(index as usize)),
        };

        match name {
            Some(name) => (*name).to_owned(),
            None => format!("{:02X}?", self.command),
        }
    }

    /// Render the value as two hex digits
    pub fn value_to_str(&self) -> String {
        display::hex(self.value)
    }

    /// Render both command and value, e.g. `ARP 37`
    pub fn to_str(&self, kind: Option<InstrumentKind>) -> String {
        format!("{} {}", self.command_to_str(kind), self.value_to_str())
    }
}

impl Default for Fx {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for Fx {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            command: reader.read_u8()?,
            value: reader.read_u8()?,
        })
    }
}

impl Encode for Fx {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.command)?;
        writer.write_u8(self.value)
    }
}

/// The sequencer and mixer commands, shared by all instrument kinds (`0x00` upward)
pub const SEQUENCER_COMMANDS: [&str; 59] = [
    // Sequencer
    "ARP", "CHA", "DEL", "GRV", "HOP", "KIL", "RAN", "RET", "REP", "NTH", "PSL", "PBN", "PVB",
    "PVX", "SCA", "SCG", "SED", "SNG", "TBL", "THO", "TIC", "TPO", "TSP",
    // Mixer and effects
    "VMV", "XCM", "XCF", "XCW", "XCR", "XDT", "XDF", "XDW", "XDR", "XRS", "XRD", "XRM", "XRF",
    "XRW", "XRZ", "VCH", "VCD", "VRE", "VT1", "VT2", "VT3", "VT4", "VT5", "VT6", "VT7", "VT8",
    "DJF", "IVO", "ICH", "IDE", "IRE", "IV2", "IC2", "ID2", "IR2", "USB",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        let arp = Fx {
            command: 0x00,
            value: 0x37,
        };
        assert_eq!(arp.to_str(None), "ARP 37");

        let table = Fx {
            command: Fx::TABLE_COMMAND,
            value: 0x01,
        };
        assert_eq!(table.command_to_str(None), "TBL");

        assert_eq!(Fx::EMPTY.to_str(None), "--- 00");

        let unknown = Fx {
            command: 0x70,
            value: 0,
        };
        assert_eq!(unknown.command_to_str(None), "70?");
    }

    #[test]
    fn instrument_commands() {
        let volume = Fx {
            command: 0x80,
            value: 0x10,
        };
        assert_eq!(
            volume.command_to_str(Some(InstrumentKind::WavSynth)),
            "VOL"
        );
        assert_eq!(volume.command_to_str(None), "80?");
        assert_eq!(volume.command_to_str(Some(InstrumentKind::None)), "80?");

        let shape = Fx {
            command: 0x83,
            value: 0x00,
        };
        assert_eq!(shape.command_to_str(Some(InstrumentKind::Sampler)), "PLY");
        assert_eq!(shape.command_to_str(Some(InstrumentKind::FmSynth)), "ALG");

        let beyond = Fx {
            command: 0xFE,
            value: 0x00,
        };
        assert_eq!(beyond.command_to_str(Some(InstrumentKind::WavSynth)), "FE?");
    }
}
