//! The parameter groups shared by (most) instrument kinds

use super::InstrumentKind;
use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
    version::Version,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Amplifier drive and limiter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmpParams {
    pub amp: u8,
    pub limit: u8,
}

impl AmpParams {
    /// The value of an amplifier on an instrument kind that doesn't have one
    pub const BLANK: Self = Self {
        amp: 0xFF,
        limit: 0xFF,
    };

    /// The names of the limiter modes
    pub const LIMIT_TYPES: [&'static str; 4] = ["CLIP", "SIN", "FOLD", "WRAP"];

    pub fn limit_to_str(&self) -> String {
        lookup(&Self::LIMIT_TYPES, self.limit)
    }
}

impl Decode for AmpParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            amp: reader.read_u8()?,
            limit: reader.read_u8()?,
        })
    }
}

impl Encode for AmpParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.amp)?;
        writer.write_u8(self.limit)
    }
}

/// Filter type, cutoff and resonance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(rename = "type")]
    pub filter_type: u8,
    pub cutoff: u8,
    pub res: u8,
}

impl FilterParams {
    /// The value of a filter on an instrument kind that doesn't have one
    pub const BLANK: Self = Self {
        filter_type: 0xFF,
        cutoff: 0xFF,
        res: 0xFF,
    };

    /// Render the filter type
    ///
    /// What a type byte means depends on both the kind of instrument (the WavSynth has
    /// extra filters) and the firmware version.
    pub fn type_to_str(&self, kind: InstrumentKind, version: Version) -> String {
        lookup(&filter_types(kind, version), self.filter_type)
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            filter_type: 0,
            cutoff: 0xFF,
            res: 0,
        }
    }
}

impl Decode for FilterParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            filter_type: reader.read_u8()?,
            cutoff: reader.read_u8()?,
            res: reader.read_u8()?,
        })
    }
}

impl Encode for FilterParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.filter_type)?;
        writer.write_u8(self.cutoff)?;
        writer.write_u8(self.res)
    }
}

const FILTER_TYPES: [&str; 6] = ["OFF", "LOWPASS", "HIGHPASS", "BANDPASS", "BANDSTOP", "LP > HP"];
const ZDF_FILTER_TYPES: [&str; 1] = ["ZDF LP"];
const WAVSYNTH_FILTER_TYPES: [&str; 4] = ["WAV LP", "WAV HP", "WAV BP", "WAV BS"];

/// The filter types available to an instrument kind, in the given firmware version
pub fn filter_types(kind: InstrumentKind, version: Version) -> Vec<&'static str> {
    let mut types = FILTER_TYPES.to_vec();

    if version.at_least(&Version::ZDF_FILTER) {
        types.extend(ZDF_FILTER_TYPES);
    }

    if kind == InstrumentKind::WavSynth {
        types.extend(WAVSYNTH_FILTER_TYPES);
    }

    types
}

/// Panning and effect sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixerParams {
    pub pan: u8,
    pub dry: u8,
    pub chorus: u8,
    pub delay: u8,
    pub reverb: u8,
}

impl MixerParams {
    /// The mixer values of an instrument kind that isn't routed through the mixer
    pub const BLANK: Self = Self {
        pan: 0xFF,
        dry: 0xFF,
        chorus: 0xFF,
        delay: 0xFF,
        reverb: 0xFF,
    };
}

impl Default for MixerParams {
    fn default() -> Self {
        Self {
            pan: 0x80,
            dry: 0xC0,
            chorus: 0,
            delay: 0,
            reverb: 0,
        }
    }
}

impl Decode for MixerParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            pan: reader.read_u8()?,
            dry: reader.read_u8()?,
            chorus: reader.read_u8()?,
            delay: reader.read_u8()?,
            reverb: reader.read_u8()?,
        })
    }
}

impl Encode for MixerParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.pan)?;
        writer.write_u8(self.dry)?;
        writer.write_u8(self.chorus)?;
        writer.write_u8(self.delay)?;
        writer.write_u8(self.reverb)
    }
}

/// An AHD envelope routed to one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeParams {
    pub dest: u8,
    pub amount: u8,
    pub attack: u8,
    pub hold: u8,
    pub decay: u8,
    pub retrigger: u8,
}

impl EnvelopeParams {
    /// The value of an envelope on an instrument kind that doesn't have one
    pub const BLANK: Self = Self {
        dest: 0xFF,
        amount: 0xFF,
        attack: 0xFF,
        hold: 0xFF,
        decay: 0xFF,
        retrigger: 0xFF,
    };

    /// Render the destination, which depends on the kind of the owning instrument
    pub fn dest_to_str(&self, kind: InstrumentKind) -> String {
        lookup(kind.destination_table(), self.dest)
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            dest: 0,
            amount: 0xFF,
            attack: 0,
            hold: 0,
            decay: 0x80,
            retrigger: 0,
        }
    }
}

impl Decode for EnvelopeParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            dest: reader.read_u8()?,
            amount: reader.read_u8()?,
            attack: reader.read_u8()?,
            hold: reader.read_u8()?,
            decay: reader.read_u8()?,
            retrigger: reader.read_u8()?,
        })
    }
}

impl Encode for EnvelopeParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.dest,
            self.amount,
            self.attack,
            self.hold,
            self.decay,
            self.retrigger,
        ])
    }
}

/// A low-frequency oscillator routed to one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LfoParams {
    pub shape: u8,
    pub dest: u8,
    pub trigger_mode: u8,
    pub freq: u8,
    pub amount: u8,
    pub retrigger: u8,
}

impl LfoParams {
    /// The value of an LFO on an instrument kind that doesn't have one
    pub const BLANK: Self = Self {
        shape: 0xFF,
        dest: 0xFF,
        trigger_mode: 0xFF,
        freq: 0xFF,
        amount: 0xFF,
        retrigger: 0xFF,
    };

    pub const SHAPES: [&'static str; 20] = [
        "TRI", "SIN", "RAMP DN", "RAMP UP", "EXP DN", "EXP UP", "SQR DN", "SQR UP", "RANDOM",
        "DRUNK", "TRI T", "SIN T", "RAMPD T", "RAMPU T", "EXPD T", "EXPU T", "SQ.D T", "SQ.U T",
        "RAND T", "DRNK T",
    ];

    pub const TRIGGER_MODES: [&'static str; 4] = ["FREE", "RETRIG", "HOLD", "ONCE"];

    pub fn shape_to_str(&self) -> String {
        lookup(&Self::SHAPES, self.shape)
    }

    pub fn trigger_mode_to_str(&self) -> String {
        lookup(&Self::TRIGGER_MODES, self.trigger_mode)
    }

    /// Render the destination, which depends on the kind of the owning instrument
    pub fn dest_to_str(&self, kind: InstrumentKind) -> String {
        lookup(kind.destination_table(), self.dest)
    }
}

impl Default for LfoParams {
    fn default() -> Self {
        Self {
            shape: 0,
            dest: 0,
            trigger_mode: 0,
            freq: 0x10,
            amount: 0xFF,
            retrigger: 0,
        }
    }
}

impl Decode for LfoParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            shape: reader.read_u8()?,
            dest: reader.read_u8()?,
            trigger_mode: reader.read_u8()?,
            freq: reader.read_u8()?,
            amount: reader.read_u8()?,
            retrigger: reader.read_u8()?,
        })
    }
}

impl Encode for LfoParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.shape,
            self.dest,
            self.trigger_mode,
            self.freq,
            self.amount,
            self.retrigger,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(text: &str) -> Version {
        text.parse().unwrap()
    }

    #[test]
    fn filter_type_tables() {
        let old = version("2.5.0");
        let new = version("2.5.1");

        assert_eq!(filter_types(InstrumentKind::Sampler, old).len(), 6);
        assert_eq!(filter_types(InstrumentKind::Sampler, new).len(), 7);
        assert_eq!(filter_types(InstrumentKind::WavSynth, old).len(), 10);
        assert_eq!(filter_types(InstrumentKind::WavSynth, new).len(), 11);

        let filter = FilterParams {
            filter_type: 6,
            ..Default::default()
        };
        assert_eq!(filter.type_to_str(InstrumentKind::MacroSynth, new), "ZDF LP");
        assert_eq!(filter.type_to_str(InstrumentKind::MacroSynth, old), "UNK (06)");
        assert_eq!(filter.type_to_str(InstrumentKind::WavSynth, old), "WAV LP");
        assert_eq!(filter.type_to_str(InstrumentKind::WavSynth, new), "ZDF LP");
    }

    #[test]
    fn unknown_destination_never_fails() {
        let envelope = EnvelopeParams {
            dest: 0xFF,
            ..Default::default()
        };

        for kind in InstrumentKind::ALL {
            assert_eq!(envelope.dest_to_str(kind), "UNK (FF)");
        }
    }

    #[test]
    fn lfo_strings() {
        let lfo = LfoParams {
            shape: 9,
            dest: 1,
            trigger_mode: 1,
            ..Default::default()
        };
        assert_eq!(lfo.shape_to_str(), "DRUNK");
        assert_eq!(lfo.trigger_mode_to_str(), "RETRIG");
        assert_eq!(lfo.dest_to_str(InstrumentKind::WavSynth), "VOLUME");
        assert_eq!(lfo.dest_to_str(InstrumentKind::None), "UNK (01)");
    }
}
