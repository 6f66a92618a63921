//! The sample player

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::lookup,
    name::Name,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// The playback parameters of a Sampler
///
/// The sample path is stored further down the instrument block than the other
/// parameters, which is why [`Decode`] and [`Encode`] only cover the playback bytes. The
/// instrument takes care of the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerParams {
    pub play_mode: u8,
    pub slice: u8,
    pub start: u8,
    pub loop_start: u8,
    pub length: u8,
    pub degrade: u8,
    pub sample_path: Name<128>,
}

impl SamplerParams {
    pub const PLAY_MODES: [&'static str; 14] = [
        "FWD", "REV", "FWDLOOP", "REVLOOP", "FWD PP", "REV PP", "OSC", "OSC REV", "OSC PP",
        "REPITCH", "REP REV", "REP PP", "REP BPM", "REP BPM REV",
    ];

    // Longer names are shortened to fit the instrument screen
    const SAMPLE_NAME_MAX: usize = 16;
    const SAMPLE_NAME_HEAD: usize = 8;
    const SAMPLE_NAME_TAIL: usize = 7;

    pub fn play_mode_to_str(&self) -> String {
        lookup(&Self::PLAY_MODES, self.play_mode)
    }

    /// Shorten the sample path to the name the device shows
    ///
    /// Directories and the extension are stripped off. Names longer than 16 characters
    /// are cut down to their first 8 and last 7 characters, joined by an underscore.
    /// The result is upper-case.
    pub fn sample_path_to_str(&self) -> String {
        let file_name = self.sample_path.as_str().rsplit('/').next().unwrap_or_default();

        // The last dot-separated segment is dropped, so a name without a dot is emptied
        let mut segments: Vec<&str> = file_name.split('.').collect();
        segments.pop();
        let stem = segments.join(".");

        let chars: Vec<char> = stem.chars().collect();
        let shortened: String = if chars.len() > Self::SAMPLE_NAME_MAX {
            let head = chars[..Self::SAMPLE_NAME_HEAD].iter();
            let tail = chars[chars.len() - Self::SAMPLE_NAME_TAIL..].iter();
            head.chain(['_'].iter()).chain(tail).collect()
        } else {
            stem
        };

        shortened.to_uppercase()
    }
}

impl Decode for SamplerParams {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            play_mode: reader.read_u8()?,
            slice: reader.read_u8()?,
            start: reader.read_u8()?,
            loop_start: reader.read_u8()?,
            length: reader.read_u8()?,
            degrade: reader.read_u8()?,
            sample_path: Name::default(),
        })
    }
}

impl Encode for SamplerParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[
            self.play_mode,
            self.slice,
            self.start,
            self.loop_start,
            self.length,
            self.degrade,
        ])
    }
}

pub(super) const COMMANDS: [&str; 35] = [
    "VOL", "PIT", "FIN", "PLY", "STA", "LOP", "LEN", "DEG", "FIL", "CUT", "RES", "AMP", "LIM",
    "PAN", "DRY", "SCH", "SDL", "SRV", "EA1", "AT1", "HO1", "DE1", "ET1", "EA2", "AT2", "HO2",
    "DE2", "ET2", "LA1", "LF1", "LT1", "LA2", "LF2", "LT2", "SLI",
];

pub(super) const DESTINATIONS: [&str; 10] = [
    "OFF", "VOLUME", "PITCH", "LOOP ST", "LENGTH", "DEGRADE", "CUTOFF", "RES", "AMP", "PAN",
];

pub(super) const MIDI_LABELS: [&str; 19] = [
    "VOLUME", "PITCH", "FINE TUNE", "PLAY MODE", "SLICE", "START", "LOOP START", "LENGTH",
    "DEGRADE", "FILTER", "CUTOFF", "RES", "AMP", "LIMIT", "PAN", "DRY", "CHORUS", "DELAY",
    "REVERB",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(path: &str) -> SamplerParams {
        SamplerParams {
            sample_path: path.parse().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn long_sample_names_are_shortened() {
        let name = sampler("/A/VeryLongSampleFileNameExceedingLimit.wav").sample_path_to_str();
        assert_eq!(name, "VERYLONG_NGLIMIT");
        assert_eq!(name.len(), 16);
    }

    #[test]
    fn short_sample_names() {
        assert_eq!(sampler("/Samples/Drums/kick.wav").sample_path_to_str(), "KICK");
        assert_eq!(sampler("snare.01.wav").sample_path_to_str(), "SNARE.01");
        assert_eq!(sampler("/Samples/HAT").sample_path_to_str(), "");
        assert_eq!(sampler("").sample_path_to_str(), "");

        // Exactly 16 characters are left alone
        assert_eq!(
            sampler("/abcdefghijklmnop.wav").sample_path_to_str(),
            "ABCDEFGHIJKLMNOP"
        );
    }

    #[test]
    fn play_modes() {
        let params = SamplerParams {
            play_mode: 2,
            ..Default::default()
        };
        assert_eq!(params.play_mode_to_str(), "FWDLOOP");
    }
}
