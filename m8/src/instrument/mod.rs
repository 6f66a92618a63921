//! Instruments: the shared shell and the six kinds of sound engine
//!
//! Every instrument slot on the M8 holds one of a closed set of kinds. They all share the
//! same 215-byte block layout: a common header, the parameters specific to the kind, and
//! (for the kinds that make sound themselves) filter, amplifier, mixer, envelopes and LFO's.
//!
//! The MIDI out and empty kinds don't use the shared sound shaping groups. Those are kept
//! in the [`Instrument`] so that every instrument has the same shape, but they are
//! blanked (see [`Instrument::blank_inert_params()`]) and left out of projections.

mod fmsynth;
mod macrosynth;
mod midiout;
mod params;
mod sampler;
mod wavsynth;

pub use fmsynth::{FmOperator, FmSynthParams, fm_shapes, mod_to_str};
pub use macrosynth::{MacroSynthParams, macrosynth_shapes};
pub use midiout::{ControlChange, MidiOutParams, midi_out_ports};
pub use params::{AmpParams, EnvelopeParams, FilterParams, LfoParams, MixerParams, filter_types};
pub use sampler::SamplerParams;
pub use wavsynth::WavSynthParams;

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::unknown,
    name::Name,
    object::{
        FromObjectError, Object, Projection, field, list_field, optional_field, to_value,
    },
    song::Table,
    version::Version,
};
use log::warn;
use std::{
    io::{self, Read, Write},
    str::FromStr,
};

/// The kind of sound engine an instrument slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    WavSynth,
    MacroSynth,
    Sampler,
    MidiOut,
    FmSynth,

    /// An empty instrument slot
    None,

    /// A kind byte this crate doesn't know about
    ///
    /// The shared groups are treated as unused, like for [`InstrumentKind::None`]. The byte
    /// and everything after the common header are kept raw (see [`InstrumentParams::Unknown`])
    /// so that the block is written back unchanged.
    Unknown(u8),
}

impl InstrumentKind {
    /// Every known kind
    pub const ALL: [Self; 6] = [
        Self::WavSynth,
        Self::MacroSynth,
        Self::Sampler,
        Self::MidiOut,
        Self::FmSynth,
        Self::None,
    ];

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::WavSynth,
            0x01 => Self::MacroSynth,
            0x02 => Self::Sampler,
            0x03 => Self::MidiOut,
            0x04 => Self::FmSynth,
            0xFF => Self::None,
            byte => Self::Unknown(byte),
        }
    }

    pub fn byte(&self) -> u8 {
        match self {
            Self::WavSynth => 0x00,
            Self::MacroSynth => 0x01,
            Self::Sampler => 0x02,
            Self::MidiOut => 0x03,
            Self::FmSynth => 0x04,
            Self::None => 0xFF,
            Self::Unknown(byte) => *byte,
        }
    }

    /// Does this kind leave the filter, amplifier, mixer, envelopes and LFO's unused?
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::MidiOut | Self::None | Self::Unknown(_))
    }

    /// The display name of the kind, e.g. `WAVSYNTH`
    pub fn kind_to_str(&self) -> String {
        match self {
            Self::WavSynth => "WAVSYNTH".to_owned(),
            Self::MacroSynth => "MACROSYNTH".to_owned(),
            Self::Sampler => "SAMPLER".to_owned(),
            Self::MidiOut => "MIDIOUT".to_owned(),
            Self::FmSynth => "FMSYNTH".to_owned(),
            Self::None => "NONE".to_owned(),
            Self::Unknown(byte) => unknown(*byte),
        }
    }

    /// The names of the instrument commands, starting at command byte `0x80`
    pub fn command_table(&self) -> &'static [&'static str] {
        match self {
            Self::WavSynth => &wavsynth::COMMANDS,
            Self::MacroSynth => &macrosynth::COMMANDS,
            Self::Sampler => &sampler::COMMANDS,
            Self::MidiOut => &midiout::COMMANDS,
            Self::FmSynth => &fmsynth::COMMANDS,
            Self::None | Self::Unknown(_) => &[],
        }
    }

    /// The names of the envelope and LFO destinations
    pub fn destination_table(&self) -> &'static [&'static str] {
        match self {
            Self::WavSynth => &wavsynth::DESTINATIONS,
            Self::MacroSynth => &macrosynth::DESTINATIONS,
            Self::Sampler => &sampler::DESTINATIONS,
            Self::MidiOut => &midiout::DESTINATIONS,
            Self::FmSynth => &fmsynth::DESTINATIONS,
            Self::None | Self::Unknown(_) => &[],
        }
    }

    /// The labels of the parameters a MIDI mapping can target, by parameter index
    pub fn midi_labels(&self) -> Vec<&'static str> {
        let own: &[&str] = match self {
            Self::WavSynth => &wavsynth::MIDI_LABELS,
            Self::MacroSynth => &macrosynth::MIDI_LABELS,
            Self::Sampler => &sampler::MIDI_LABELS,
            Self::FmSynth => &fmsynth::MIDI_LABELS,
            Self::MidiOut => return midiout::MIDI_LABELS.to_vec(),
            Self::None | Self::Unknown(_) => &[],
        };

        own.iter().chain(BASE_MIDI_LABELS.iter()).copied().collect()
    }
}

impl FromStr for InstrumentKind {
    type Err = FromObjectError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let kind = match text {
            "WAVSYNTH" => Self::WavSynth,
            "MACROSYNTH" => Self::MacroSynth,
            "SAMPLER" => Self::Sampler,
            "MIDIOUT" => Self::MidiOut,
            "FMSYNTH" => Self::FmSynth,
            "NONE" => Self::None,
            text => text
                .strip_prefix("UNK (")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .map(Self::from_byte)
                .ok_or_else(|| FromObjectError::UnknownKind(text.to_owned()))?,
        };

        Ok(kind)
    }
}

// The envelope and LFO parameters every sounding instrument exposes to MIDI mappings
const BASE_MIDI_LABELS: [&str; 12] = [
    "ENV1 AMT", "ENV1 ATK", "ENV1 HOLD", "ENV1 DEC", "ENV2 AMT", "ENV2 ATK", "ENV2 HOLD",
    "ENV2 DEC", "LFO1 FREQ", "LFO1 AMT", "LFO2 FREQ", "LFO2 AMT",
];

/// The parameters specific to each instrument kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentParams {
    WavSynth(WavSynthParams),
    MacroSynth(MacroSynthParams),
    Sampler(SamplerParams),
    MidiOut(MidiOutParams),
    FmSynth(FmSynthParams),
    None,

    /// The block of an unknown kind past the common header, byte for byte
    Unknown(Vec<u8>),
}

impl InstrumentParams {
    /// The number of raw bytes kept for an unknown kind
    pub const RAW_LEN: usize = (Instrument::BLOCK_LEN - Instrument::PARAMS_OFFSET) as usize;

    fn default_for(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::WavSynth => Self::WavSynth(Default::default()),
            InstrumentKind::MacroSynth => Self::MacroSynth(Default::default()),
            InstrumentKind::Sampler => Self::Sampler(Default::default()),
            InstrumentKind::MidiOut => Self::MidiOut(Default::default()),
            InstrumentKind::FmSynth => Self::FmSynth(Default::default()),
            InstrumentKind::None => Self::None,
            InstrumentKind::Unknown(_) => Self::Unknown(vec![Instrument::BLANK; Self::RAW_LEN]),
        }
    }

    fn decode<R>(kind: InstrumentKind, reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(match kind {
            InstrumentKind::WavSynth => Self::WavSynth(reader.decode()?),
            InstrumentKind::MacroSynth => Self::MacroSynth(reader.decode()?),
            InstrumentKind::Sampler => Self::Sampler(reader.decode()?),
            InstrumentKind::MidiOut => Self::MidiOut(reader.decode()?),
            InstrumentKind::FmSynth => Self::FmSynth(reader.decode()?),
            InstrumentKind::None => Self::None,
            InstrumentKind::Unknown(_) => {
                Self::Unknown(reader.read_bytes::<{ InstrumentParams::RAW_LEN }>()?.to_vec())
            }
        })
    }

    fn from_object(kind: InstrumentKind, object: &Object) -> Result<Self, FromObjectError> {
        const KEY: &str = "instrParams";

        Ok(match kind {
            InstrumentKind::WavSynth => Self::WavSynth(field(object, KEY)?),
            InstrumentKind::MacroSynth => Self::MacroSynth(field(object, KEY)?),
            InstrumentKind::Sampler => Self::Sampler(field(object, KEY)?),
            InstrumentKind::MidiOut => Self::MidiOut(field(object, KEY)?),
            InstrumentKind::FmSynth => Self::FmSynth(field(object, KEY)?),
            InstrumentKind::None => Self::None,
            InstrumentKind::Unknown(_) => Self::Unknown(list_field(object, KEY, Self::RAW_LEN)?),
        })
    }

    fn to_value(&self) -> Option<serde_json::Value> {
        match self {
            Self::WavSynth(params) => Some(to_value(params)),
            Self::MacroSynth(params) => Some(to_value(params)),
            Self::Sampler(params) => Some(to_value(params)),
            Self::MidiOut(params) => Some(to_value(params)),
            Self::FmSynth(params) => Some(to_value(params)),
            Self::None => None,
            Self::Unknown(bytes) => Some(to_value(bytes)),
        }
    }
}

impl Encode for InstrumentParams {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        match self {
            Self::WavSynth(params) => params.encode(writer),
            Self::MacroSynth(params) => params.encode(writer),
            Self::Sampler(params) => params.encode(writer),
            Self::MidiOut(params) => params.encode(writer),
            Self::FmSynth(params) => params.encode(writer),
            Self::None => Ok(()),
            Self::Unknown(bytes) => writer.write_bytes(bytes),
        }
    }
}

/// Mutable access to the kind-specific parameters, without being able to change the kind
#[derive(Debug)]
pub enum ParamsMut<'a> {
    WavSynth(&'a mut WavSynthParams),
    MacroSynth(&'a mut MacroSynthParams),
    Sampler(&'a mut SamplerParams),
    MidiOut(&'a mut MidiOutParams),
    FmSynth(&'a mut FmSynthParams),
    None,

    /// The raw bytes of an unknown kind, which can be edited but not resized
    Unknown(&'a mut [u8]),
}

/// A single instrument
///
/// The kind and version are fixed when the instrument is created, and so is the number of
/// LFO's (one before [`Version::LFO_PAIR`], two from then on). Everything else can be
/// edited freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    version: Version,
    kind: InstrumentKind,

    pub name: Name<12>,
    pub transpose: bool,
    pub table_tick: u8,
    pub volume: u8,
    pub pitch: u8,
    pub fine_tune: u8,

    pub amp: AmpParams,
    pub filter: FilterParams,
    pub mixer: MixerParams,
    pub envelopes: [EnvelopeParams; 2],
    lfos: Vec<LfoParams>,

    params: InstrumentParams,

    /// The instrument table
    ///
    /// Instrument files carry one. Instruments inside a song don't, since the song stores
    /// all of its tables separately.
    pub table: Option<Table>,
}

impl Instrument {
    /// The size of an instrument in a file, excluding its table
    pub const BLOCK_LEN: u64 = 0xD7;

    // Block offsets
    const PARAMS_OFFSET: u64 = 0x12;
    const MODULATORS_OFFSET: u64 = 0x3F;
    const SAMPLE_PATH_OFFSET: u64 = 0x57;

    const BLANK: u8 = 0xFF;

    /// Create a default instrument of a specific kind
    pub fn new(kind: InstrumentKind, version: Version) -> Self {
        let mut instrument = Self {
            version,
            kind,
            name: Name::default(),
            transpose: true,
            table_tick: 1,
            volume: 0,
            pitch: 0,
            fine_tune: 0x80,
            amp: AmpParams::default(),
            filter: FilterParams::default(),
            mixer: MixerParams::default(),
            envelopes: [EnvelopeParams::default(); 2],
            lfos: vec![LfoParams::default(); Self::lfo_count(version)],
            params: InstrumentParams::default_for(kind),
            table: Some(Table::default()),
        };

        instrument.blank_inert_params();
        instrument
    }

    /// The number of LFO's instruments have in a specific firmware version
    pub fn lfo_count(version: Version) -> usize {
        if version.at_least(&Version::LFO_PAIR) {
            2
        } else {
            1
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn lfos(&self) -> &[LfoParams] {
        &self.lfos
    }

    pub fn lfos_mut(&mut self) -> &mut [LfoParams] {
        &mut self.lfos
    }

    pub fn params(&self) -> &InstrumentParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> ParamsMut<'_> {
        match &mut self.params {
            InstrumentParams::WavSynth(params) => ParamsMut::WavSynth(params),
            InstrumentParams::MacroSynth(params) => ParamsMut::MacroSynth(params),
            InstrumentParams::Sampler(params) => ParamsMut::Sampler(params),
            InstrumentParams::MidiOut(params) => ParamsMut::MidiOut(params),
            InstrumentParams::FmSynth(params) => ParamsMut::FmSynth(params),
            InstrumentParams::None => ParamsMut::None,
            InstrumentParams::Unknown(bytes) => ParamsMut::Unknown(bytes.as_mut_slice()),
        }
    }

    /// Set the groups an inert kind doesn't use to their blank value
    ///
    /// This is a no-op for the kinds that make sound themselves. The raw bytes of an
    /// unknown kind are left as they are.
    pub fn blank_inert_params(&mut self) {
        if !self.kind.is_inert() {
            return;
        }

        self.amp = AmpParams::BLANK;
        self.filter = FilterParams::BLANK;
        self.mixer = MixerParams::BLANK;
        self.envelopes = [EnvelopeParams::BLANK; 2];
        self.lfos.fill(LfoParams::BLANK);
    }
}

impl Decode for Instrument {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let start = reader.position();
        let version = reader.version();

        let kind = InstrumentKind::from_byte(reader.read_u8()?);
        if let InstrumentKind::Unknown(byte) = kind {
            warn!("Unknown instrument kind {byte:#04X} at offset {start:#X}, keeping its bytes as-is");
        }

        let mut instrument = Self::new(kind, version);
        instrument.table = None;

        instrument.name = reader.read_name()?;
        instrument.transpose = reader.read_bool()?;
        instrument.table_tick = reader.read_u8()?;
        instrument.volume = reader.read_u8()?;
        instrument.pitch = reader.read_u8()?;
        instrument.fine_tune = reader.read_u8()?;

        instrument.params = InstrumentParams::decode(kind, reader)?;

        if !kind.is_inert() {
            instrument.filter = reader.decode()?;
            instrument.amp = reader.decode()?;
            instrument.mixer = reader.decode()?;

            reader.skip_to(start + Self::MODULATORS_OFFSET)?;
            instrument.envelopes = reader.decode_array()?;
            for lfo in &mut instrument.lfos {
                *lfo = reader.decode()?;
            }
        }

        if let InstrumentParams::Sampler(sampler) = &mut instrument.params {
            reader.skip_to(start + Self::SAMPLE_PATH_OFFSET)?;
            sampler.sample_path = reader.read_name()?;
        }

        reader.skip_to(start + Self::BLOCK_LEN)?;

        Ok(instrument)
    }
}

impl Encode for Instrument {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        let start = writer.position();

        writer.write_u8(self.kind.byte())?;
        writer.write_name(&self.name)?;
        writer.write_bool(self.transpose)?;
        writer.write_bytes(&[self.table_tick, self.volume, self.pitch, self.fine_tune])?;

        debug_assert_eq!(writer.position(), start + Self::PARAMS_OFFSET);
        writer.encode(&self.params)?;

        match &self.params {
            // Already runs up to the end of the block
            InstrumentParams::Unknown(_) => {}
            _ if self.kind.is_inert() => {
                writer.fill_to(start + Self::SAMPLE_PATH_OFFSET, Self::BLANK)?;
            }
            _ => {
                writer.encode(&self.filter)?;
                writer.encode(&self.amp)?;
                writer.encode(&self.mixer)?;

                writer.pad_to(start + Self::MODULATORS_OFFSET)?;
                writer.encode(&self.envelopes)?;
                for lfo in self.lfos.iter().take(Self::lfo_count(writer.version())) {
                    writer.encode(lfo)?;
                }
                writer.pad_to(start + Self::SAMPLE_PATH_OFFSET)?;
            }
        }

        if let InstrumentParams::Sampler(sampler) = &self.params {
            writer.write_name(&sampler.sample_path)?;
        }

        writer.pad_to(start + Self::BLOCK_LEN)
    }
}

impl Projection for Instrument {
    fn object_properties(&self) -> Vec<&'static str> {
        let mut keys = vec![
            "kind",
            "name",
            "transpose",
            "tableTick",
            "volume",
            "pitch",
            "fineTune",
        ];

        if !self.kind.is_inert() {
            keys.extend([
                "ampParams",
                "filterParams",
                "mixerParams",
                "envelopes",
                "lfos",
            ]);
        }

        if self.params != InstrumentParams::None {
            keys.push("instrParams");
        }

        if self.table.is_some() {
            keys.push("table");
        }

        keys
    }

    fn to_object(&self) -> Object {
        let mut object = Object::new();

        object.insert("kind".into(), self.kind.kind_to_str().into());
        object.insert("name".into(), to_value(&self.name));
        object.insert("transpose".into(), self.transpose.into());
        object.insert("tableTick".into(), self.table_tick.into());
        object.insert("volume".into(), self.volume.into());
        object.insert("pitch".into(), self.pitch.into());
        object.insert("fineTune".into(), self.fine_tune.into());

        if !self.kind.is_inert() {
            object.insert("ampParams".into(), to_value(&self.amp));
            object.insert("filterParams".into(), to_value(&self.filter));
            object.insert("mixerParams".into(), to_value(&self.mixer));
            object.insert("envelopes".into(), to_value(&self.envelopes));
            object.insert("lfos".into(), to_value(&self.lfos));
        }

        if let Some(params) = self.params.to_value() {
            object.insert("instrParams".into(), params);
        }

        if let Some(table) = &self.table {
            object.insert("table".into(), to_value(table));
        }

        object
    }

    fn from_object(object: &Object, version: Version) -> Result<Self, FromObjectError> {
        let kind: InstrumentKind = field::<String>(object, "kind")?.parse()?;

        let mut instrument = Self::new(kind, version);
        instrument.name = field(object, "name")?;
        instrument.transpose = field(object, "transpose")?;
        instrument.table_tick = field(object, "tableTick")?;
        instrument.volume = field(object, "volume")?;
        instrument.pitch = field(object, "pitch")?;
        instrument.fine_tune = field(object, "fineTune")?;

        if !kind.is_inert() {
            instrument.amp = field(object, "ampParams")?;
            instrument.filter = field(object, "filterParams")?;
            instrument.mixer = field(object, "mixerParams")?;
            instrument.envelopes = field(object, "envelopes")?;
            instrument.lfos = list_field(object, "lfos", Self::lfo_count(version))?;
        }

        instrument.params = InstrumentParams::from_object(kind, object)?;
        instrument.table = optional_field(object, "table")?;

        Ok(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn version(text: &str) -> Version {
        text.parse().unwrap()
    }

    fn round_trip(instrument: &Instrument) -> (Vec<u8>, Instrument) {
        let mut bytes = Vec::new();
        instrument
            .encode(&mut Writer::new(&mut bytes, instrument.version(), 0))
            .unwrap();

        let decoded =
            Instrument::decode(&mut Reader::new(Cursor::new(&bytes), instrument.version(), 0))
                .unwrap();

        (bytes, decoded)
    }

    #[test]
    fn lfo_count_follows_version() {
        for text in ["1.0.0", "1.3.9", "1.4.0", "2.7.0", "3.0.0"] {
            let version = version(text);
            let expected = if version < Version::LFO_PAIR { 1 } else { 2 };

            for kind in InstrumentKind::ALL {
                assert_eq!(Instrument::new(kind, version).lfos().len(), expected);
            }
        }
    }

    #[test]
    fn kinds() {
        for kind in InstrumentKind::ALL {
            assert_eq!(InstrumentKind::from_byte(kind.byte()), kind);
            assert_eq!(kind.kind_to_str().parse::<InstrumentKind>().unwrap(), kind);
        }

        let unknown = InstrumentKind::from_byte(0x07);
        assert_eq!(unknown, InstrumentKind::Unknown(0x07));
        assert_eq!(unknown.kind_to_str(), "UNK (07)");
        assert_eq!("UNK (07)".parse::<InstrumentKind>().unwrap(), unknown);
        assert!("BANJO".parse::<InstrumentKind>().is_err());
    }

    #[test]
    fn midi_labels() {
        let wavsynth = InstrumentKind::WavSynth.midi_labels();
        assert_eq!(wavsynth.first(), Some(&"VOLUME"));
        assert_eq!(wavsynth.last(), Some(&"LFO2 AMT"));

        assert_eq!(InstrumentKind::None.midi_labels(), BASE_MIDI_LABELS.to_vec());
        assert_eq!(InstrumentKind::MidiOut.midi_labels().first(), Some(&"CHANNEL"));
        assert!(!InstrumentKind::MidiOut.midi_labels().contains(&"ENV1 AMT"));
    }

    #[test]
    fn inert_kinds_are_blanked() {
        for kind in [InstrumentKind::MidiOut, InstrumentKind::None] {
            let instrument = Instrument::new(kind, Version::LATEST);
            assert_eq!(instrument.amp, AmpParams::BLANK);
            assert_eq!(instrument.filter, FilterParams::BLANK);
            assert_eq!(instrument.mixer, MixerParams::BLANK);
            assert_eq!(instrument.envelopes, [EnvelopeParams::BLANK; 2]);
            assert!(instrument.lfos().iter().all(|lfo| *lfo == LfoParams::BLANK));
        }

        let mut wavsynth = Instrument::new(InstrumentKind::WavSynth, Version::LATEST);
        wavsynth.blank_inert_params();
        assert_eq!(wavsynth.amp, AmpParams::default());
    }

    #[test]
    fn block_layout() {
        let mut instrument = Instrument::new(InstrumentKind::Sampler, Version::LATEST);
        instrument.name = "KICK".parse().unwrap();
        instrument.volume = 0x10;
        instrument.envelopes[0].amount = 0x42;
        if let ParamsMut::Sampler(sampler) = instrument.params_mut() {
            sampler.play_mode = 3;
            sampler.sample_path = "/Samples/kick.wav".parse().unwrap();
        }
        instrument.table = None;

        let (bytes, decoded) = round_trip(&instrument);
        assert_eq!(bytes.len() as u64, Instrument::BLOCK_LEN);
        assert_eq!(bytes[0], 0x02);
        assert_eq!(&bytes[1..5], b"KICK");
        assert_eq!(bytes[0x0F], 0x10);
        assert_eq!(bytes[0x12], 3);
        assert_eq!(bytes[0x40], 0x42);
        assert_eq!(&bytes[0x57..0x68], b"/Samples/kick.wav");
        assert_eq!(decoded, instrument);
    }

    #[test]
    fn inert_kinds_write_blank_bytes() {
        let mut instrument = Instrument::new(InstrumentKind::None, Version::LATEST);
        instrument.table = None;

        let (bytes, decoded) = round_trip(&instrument);
        assert!(bytes[0x12..0x57].iter().all(|byte| *byte == 0xFF));
        assert_eq!(decoded, instrument);

        let unknown = Instrument::new(InstrumentKind::Unknown(0x09), Version::LATEST);
        assert!(round_trip(&unknown).0[0x12..].iter().all(|byte| *byte == 0xFF));
    }

    #[test]
    fn unknown_kinds_keep_their_bytes() {
        let mut bytes = vec![0xFF; Instrument::BLOCK_LEN as usize];
        bytes[..0x12].fill(0);
        bytes[0] = 0x05;
        bytes[1..4].copy_from_slice(b"NEW");
        bytes[0x0D] = 1;
        bytes[0x12..0x57].fill(0x11);
        bytes[0xD0] = 0x42;

        let mut decoded =
            Instrument::decode(&mut Reader::new(Cursor::new(&bytes), Version::LATEST, 0)).unwrap();
        assert_eq!(decoded.kind(), InstrumentKind::Unknown(0x05));
        assert_eq!(
            decoded.params(),
            &InstrumentParams::Unknown(bytes[0x12..].to_vec())
        );

        decoded.blank_inert_params();
        decoded.table = None;
        let (encoded, again) = round_trip(&decoded);
        assert_eq!(encoded, bytes);
        assert_eq!(again, decoded);

        if let ParamsMut::Unknown(raw) = decoded.params_mut() {
            raw[0] = 0x22;
        }
        assert_eq!(round_trip(&decoded).0[0x12], 0x22);

        let object = decoded.to_object();
        assert!(object.contains_key("instrParams"));
        assert!(!object.contains_key("ampParams"));
        assert_eq!(Instrument::from_object(&object, Version::LATEST).unwrap(), decoded);
    }

    #[test]
    fn single_lfo_layout() {
        let mut instrument = Instrument::new(InstrumentKind::FmSynth, version("1.3.0"));
        instrument.lfos_mut()[0].freq = 0x33;
        instrument.table = None;

        let (bytes, decoded) = round_trip(&instrument);
        assert_eq!(bytes[0x3F + 12 + 3], 0x33);
        assert!(bytes[0x3F + 18..0x57].iter().all(|byte| *byte == 0));
        assert_eq!(decoded, instrument);
    }

    #[test]
    fn inert_kinds_are_left_out_of_projections() {
        let groups = ["ampParams", "envelopes", "filterParams", "lfos", "mixerParams"];

        let none = Instrument::new(InstrumentKind::None, Version::LATEST).to_object();
        let midi_out = Instrument::new(InstrumentKind::MidiOut, Version::LATEST).to_object();
        for key in groups {
            assert!(!none.contains_key(key));
            assert!(!midi_out.contains_key(key));
        }
        assert!(!none.contains_key("instrParams"));
        assert!(midi_out.contains_key("instrParams"));

        let wavsynth = Instrument::new(InstrumentKind::WavSynth, Version::LATEST).to_object();
        for key in groups {
            assert!(wavsynth.contains_key(key));
        }
    }

    #[test]
    fn object_round_trip() {
        for kind in InstrumentKind::ALL {
            for version in [version("1.2.0"), Version::LATEST] {
                let mut instrument = Instrument::new(kind, version);
                instrument.name = "LEAD".parse().unwrap();
                instrument.pitch = 0x0C;

                let object = instrument.to_object();
                let keys: Vec<&str> = object.keys().map(String::as_str).collect();
                assert_eq!(keys, instrument.object_properties());

                let restored = Instrument::from_object(&object, version).unwrap();
                assert_eq!(restored, instrument);
            }
        }
    }

    #[test]
    fn projection_checks_lfo_count() {
        let instrument = Instrument::new(InstrumentKind::WavSynth, Version::LATEST);
        let object = instrument.to_object();

        assert!(matches!(
            Instrument::from_object(&object, version("1.3.0")),
            Err(FromObjectError::WrongLength { key: "lfos", .. })
        ));
    }
}
