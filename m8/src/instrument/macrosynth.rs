//! The macro oscillator (Braids-style) synthesizer

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
    version::Version,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// The oscillator parameters of a MacroSynth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSynthParams {
    pub shape: u8,
    pub timbre: u8,
    pub color: u8,
    pub degrade: u8,
    pub redux: u8,
}

impl MacroSynthParams {
    /// Render the oscillator shape, as named in the given firmware version
    pub fn shape_to_str(&self, version: Version) -> String {
        lookup(&macrosynth_shapes(version), self.shape)
    }
}

impl Decode for MacroSynthParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            shape: reader.read_u8()?,
            timbre: reader.read_u8()?,
            color: reader.read_u8()?,
            degrade: reader.read_u8()?,
            redux: reader.read_u8()?,
        })
    }
}

impl Encode for MacroSynthParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[self.shape, self.timbre, self.color, self.degrade, self.redux])
    }
}

const SHAPES: [&str; 44] = [
    "CSAW", "MORPH", "SAW SQUARE", "SINE TRIANGLE", "BUZZ", "SQUARE SUB", "SAW SUB",
    "SQUARE SYNC", "SAW SYNC", "TRIPLE SAW", "TRIPLE SQUARE", "TRIPLE TRIANGLE", "TRIPLE SIN",
    "TRIPLE RNG", "SAW SWARM", "SAW COMB", "TOY", "DIGITAL FILTER LP", "DIGITAL FILTER PK",
    "DIGITAL FILTER BP", "DIGITAL FILTER HP", "VOSIM", "VOWEL", "VOWEL FOF", "HARMONICS", "FM",
    "FEEDBACK FM", "CHAOTIC FEEDBACK FM", "PLUCKED", "BOWED", "BLOWN", "FLUTED", "STRUCK BELL",
    "STRUCK DRUM", "KICK", "CYMBAL", "SNARE", "WAVETABLES", "WAVE MAP", "WAVE LINE",
    "WAVE PARAPHONIC", "FILTERED NOISE", "TWIN PEAKS NOISE", "CLOCKED NOISE",
];

const NOISE_SHAPES: [&str; 4] = ["GRANULAR CLOUD", "PARTICLE NOISE", "DIGITAL MOD", "MORSE NOISE"];

/// The MacroSynth oscillator shapes available in the given firmware version
pub fn macrosynth_shapes(version: Version) -> Vec<&'static str> {
    let mut shapes = SHAPES.to_vec();

    if version.at_least(&Version::MACRO_NOISE_SHAPES) {
        shapes.extend(NOISE_SHAPES);
    }

    shapes
}

pub(super) const COMMANDS: [&str; 35] = [
    "VOL", "PIT", "FIN", "OSC", "TBR", "COL", "DEG", "RED", "FIL", "CUT", "RES", "AMP", "LIM",
    "PAN", "DRY", "SCH", "SDL", "SRV", "EA1", "AT1", "HO1", "DE1", "ET1", "EA2", "AT2", "HO2",
    "DE2", "ET2", "LA1", "LF1", "LT1", "LA2", "LF2", "LT2", "TRG",
];

pub(super) const DESTINATIONS: [&str; 11] = [
    "OFF", "VOLUME", "PITCH", "TIMBRE", "COLOR", "DEGRADE", "REDUX", "CUTOFF", "RES", "AMP",
    "PAN",
];

pub(super) const MIDI_LABELS: [&str; 18] = [
    "VOLUME", "PITCH", "FINE TUNE", "SHAPE", "TIMBRE", "COLOR", "DEGRADE", "REDUX", "FILTER",
    "CUTOFF", "RES", "AMP", "LIMIT", "PAN", "DRY", "CHORUS", "DELAY", "REVERB",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_table_per_version() {
        let params = MacroSynthParams {
            shape: 44,
            ..Default::default()
        };

        let old = Version::new(1, 4, 0).unwrap();
        assert_eq!(macrosynth_shapes(old).len(), 44);
        assert_eq!(params.shape_to_str(old), "UNK (2C)");

        let new = Version::new(2, 0, 0).unwrap();
        assert_eq!(macrosynth_shapes(new).len(), 48);
        assert_eq!(params.shape_to_str(new), "GRANULAR CLOUD");
    }
}
