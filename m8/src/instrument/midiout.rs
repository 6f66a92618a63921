//! The external MIDI output "instrument"

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
    version::Version,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A custom control change, sent whenever a note triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChange {
    pub number: u8,
    pub default_value: u8,
}

impl Default for ControlChange {
    fn default() -> Self {
        Self {
            number: 0xFF,
            default_value: 0xFF,
        }
    }
}

impl Decode for ControlChange {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            number: reader.read_u8()?,
            default_value: reader.read_u8()?,
        })
    }
}

impl Encode for ControlChange {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.number)?;
        writer.write_u8(self.default_value)
    }
}

/// Where and what a MIDI out instrument sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidiOutParams {
    pub port: u8,
    pub channel: u8,
    pub bank_select: u8,
    pub program_change: u8,
    pub custom_cc: [ControlChange; 10],
}

impl MidiOutParams {
    /// Render the output port, as named in the given firmware version
    pub fn port_to_str(&self, version: Version) -> String {
        lookup(&midi_out_ports(version), self.port)
    }

    /// The channel as shown on the device (1-based)
    pub fn channel_to_str(&self) -> String {
        format!("{:02}", u16::from(self.channel) + 1)
    }
}

impl Default for MidiOutParams {
    fn default() -> Self {
        Self {
            port: 0,
            channel: 0,
            bank_select: 0xFF,
            program_change: 0xFF,
            custom_cc: [ControlChange::default(); 10],
        }
    }
}

impl Decode for MidiOutParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let port = reader.read_u8()?;
        let channel = reader.read_u8()?;
        let bank_select = reader.read_u8()?;
        let program_change = reader.read_u8()?;

        reader.skip(3)?;

        Ok(Self {
            port,
            channel,
            bank_select,
            program_change,
            custom_cc: reader.decode_array()?,
        })
    }
}

impl Encode for MidiOutParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.port,
            self.channel,
            self.bank_select,
            self.program_change,
        ])?;
        writer.write_bytes(&[0; 3])?;
        writer.encode(&self.custom_cc)
    }
}

const PORTS: [&str; 3] = ["MIDI + USB", "MIDI", "USB"];
const INTERNAL_PORT: [&str; 1] = ["INTERNAL"];

/// The MIDI output ports available in the given firmware version
pub fn midi_out_ports(version: Version) -> Vec<&'static str> {
    let mut ports = PORTS.to_vec();

    if version.at_least(&Version::MIDI_INTERNAL_PORT) {
        ports.extend(INTERNAL_PORT);
    }

    ports
}

pub(super) const COMMANDS: [&str; 15] = [
    "VOL", "PIT", "MSB", "LSB", "PRG", "CCA", "CCB", "CCC", "CCD", "CCE", "CCF", "CCG", "CCH",
    "CCI", "CCJ",
];

pub(super) const DESTINATIONS: [&str; 11] = [
    "OFF", "CCA", "CCB", "CCC", "CCD", "CCE", "CCF", "CCG", "CCH", "CCI", "CCJ",
];

// A MIDI out instrument has no envelopes or LFOs, so it doesn't share the base labels
pub(super) const MIDI_LABELS: [&str; 13] = [
    "CHANNEL", "BANK", "PROGRAM", "CC A", "CC B", "CC C", "CC D", "CC E", "CC F", "CC G",
    "CC H", "CC I", "CC J",
];
