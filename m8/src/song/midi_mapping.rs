use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A binding from an incoming MIDI control change to a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidiMapping {
    pub channel: u8,
    pub control_number: u8,

    /// The instrument index, for mappings that target an instrument
    pub value: u8,

    /// What kind of parameter is targeted; see [`MidiMapping::KINDS`]
    pub kind: u8,
    pub param_index: u8,
    pub min_value: u8,
    pub max_value: u8,
}

impl MidiMapping {
    pub const EMPTY: Self = Self {
        channel: 0,
        control_number: 0xFF,
        value: 0,
        kind: 0,
        param_index: 0,
        min_value: 0,
        max_value: 0xFF,
    };

    pub const KINDS: [&'static str; 3] = ["INSTRUMENT", "MIXER", "EFFECTS"];

    pub const KIND_INSTRUMENT: u8 = 0;
    pub const KIND_MIXER: u8 = 1;
    pub const KIND_EFFECTS: u8 = 2;

    pub const MIXER_LABELS: [&'static str; 26] = [
        "MASTER VOL", "MASTER LIM", "TRACK 1", "TRACK 2", "TRACK 3", "TRACK 4", "TRACK 5",
        "TRACK 6", "TRACK 7", "TRACK 8", "CHORUS", "DELAY", "REVERB", "INPUT", "INPUT 2", "USB",
        "INPUT CHO", "INPUT 2 CHO", "INPUT DEL", "INPUT 2 DEL", "INPUT REV", "INPUT 2 REV",
        "USB CHO", "USB DEL", "USB REV", "DJ FILTER",
    ];

    pub const EFFECTS_LABELS: [&'static str; 17] = [
        "CHO MOD DEPTH", "CHO MOD FREQ", "CHO REV SEND", "DEL FILTER HP", "DEL FILTER LP",
        "DEL TIME L", "DEL TIME R", "DEL FEEDBACK", "DEL WIDTH", "DEL REV SEND", "REV FILTER HP",
        "REV FILTER LP", "REV SIZE", "REV DAMPING", "REV MOD DEPTH", "REV MOD FREQ", "REV WIDTH",
    ];

    /// Is this slot unused?
    pub fn is_empty(&self) -> bool {
        self.control_number == Self::EMPTY.control_number
    }

    pub fn kind_to_str(&self) -> String {
        lookup(&Self::KINDS, self.kind)
    }
}

impl Default for MidiMapping {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for MidiMapping {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let mapping = Self {
            channel: reader.read_u8()?,
            control_number: reader.read_u8()?,
            value: reader.read_u8()?,
            kind: reader.read_u8()?,
            param_index: reader.read_u8()?,
            min_value: reader.read_u8()?,
            max_value: reader.read_u8()?,
        };

        reader.skip(2)?;

        Ok(mapping)
    }
}

impl Encode for MidiMapping {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.channel,
            self.control_number,
            self.value,
            self.kind,
            self.param_index,
            self.min_value,
            self.max_value,
            0,
            0,
        ])
    }
}
