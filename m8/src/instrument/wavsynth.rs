//! The wavetable synthesizer

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// The oscillator parameters of a WavSynth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavSynthParams {
    pub shape: u8,
    pub size: u8,
    pub mult: u8,
    pub warp: u8,
    pub mirror: u8,
}

impl WavSynthParams {
    pub const SHAPES: [&'static str; 69] = [
        "PULSE 12", "PULSE 25", "PULSE 50", "PULSE 75", "SAW", "TRIANGLE", "SINE", "NOISE PITCHED",
        "NOISE", "WT CRUSH", "WT FOLDING", "WT FREQ", "WT FUZZY", "WT GHOST", "WT GRAPHIC",
        "WT LFOPLAY", "WT LIQUID", "WT MORPHING", "WT MYSTIC", "WT STICKY", "WT TIDAL",
        "WT TIDY", "WT TUBE", "WT UMBRELLA", "WT UNWIND", "WT VIRAL", "WT WAVES", "WT DRIP",
        "WT FROGGY", "WT INSONIC", "WT RADIUS", "WT SCRATCH", "WT SMOOTH", "WT WOBBLE",
        "WT ASIMMTRY", "WT BLEEN", "WT FRACTAL", "WT GENTLE", "WT HARMONIC", "WT HYPNOTIC",
        "WT ITERATIV", "WT MICROWAV", "WT PLAITS01", "WT PLAITS02", "WT RISEFALL", "WT TONAL",
        "WT TWINE", "WT ALIEN", "WT CYBERNET", "WT DISORDR", "WT FORMANT", "WT HYPER",
        "WT JAGGED", "WT MIXED", "WT MULTIPLY", "WT NOWHERE", "WT PINBALL", "WT RINGS",
        "WT SHIMMER", "WT SPECTRAL", "WT SPOOKY", "WT TRANSFRM", "WT TWISTED", "WT VOCAL",
        "WT WASHED", "WT WONDER", "WT WOWEE", "WT ZAP", "WT BRAIDS",
    ];

    pub fn shape_to_str(&self) -> String {
        lookup(&Self::SHAPES, self.shape)
    }
}

impl Decode for WavSynthParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            shape: reader.read_u8()?,
            size: reader.read_u8()?,
            mult: reader.read_u8()?,
            warp: reader.read_u8()?,
            mirror: reader.read_u8()?,
        })
    }
}

impl Encode for WavSynthParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[self.shape, self.size, self.mult, self.warp, self.mirror])
    }
}

pub(super) const COMMANDS: [&str; 34] = [
    "VOL", "PIT", "FIN", "OSC", "SIZ", "MUL", "WRP", "MIR", "FIL", "CUT", "RES", "AMP", "LIM",
    "PAN", "DRY", "SCH", "SDL", "SRV", "EA1", "AT1", "HO1", "DE1", "ET1", "EA2", "AT2", "HO2",
    "DE2", "ET2", "LA1", "LF1", "LT1", "LA2", "LF2", "LT2",
];

pub(super) const DESTINATIONS: [&str; 11] = [
    "OFF", "VOLUME", "PITCH", "SIZE", "MULT", "WARP", "MIRROR", "CUTOFF", "RES", "AMP", "PAN",
];

pub(super) const MIDI_LABELS: [&str; 18] = [
    "VOLUME", "PITCH", "FINE TUNE", "SHAPE", "SIZE", "MULT", "WARP", "MIRROR", "FILTER",
    "CUTOFF", "RES", "AMP", "LIMIT", "PAN", "DRY", "CHORUS", "DELAY", "REVERB",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        let params = WavSynthParams {
            shape: 4,
            ..Default::default()
        };
        assert_eq!(params.shape_to_str(), "SAW");

        let params = WavSynthParams {
            shape: 0x45,
            ..Default::default()
        };
        assert_eq!(params.shape_to_str(), "UNK (45)");
    }
}
