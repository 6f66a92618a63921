//! The song: everything a project on the M8 consists of
//!
//! A song owns fixed-size banks of phrases, chains, tables, instruments, grooves, MIDI
//! mappings and scales, plus the song-wide settings. Everything refers to everything
//! else by index: song rows hold chain indices, chain steps hold phrase indices, phrase
//! steps hold instrument indices, and so on.

mod chain;
mod groove;
mod lookup;
mod midi_mapping;
mod phrase;
mod settings;
mod table;

pub use chain::{Chain, ChainStep};
pub use groove::Groove;
pub use lookup::TrackPosition;
pub use midi_mapping::MidiMapping;
pub use phrase::{Phrase, PhraseStep};
pub use settings::{EffectsSettings, MidiSettings, MixerSettings};
pub use table::{Table, TableStep};

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::key_to_str,
    instrument::{Instrument, InstrumentKind},
    name::Name,
    object::{FromObjectError, Object, Projection, field, list_field, to_value},
    scale::Scale,
    version::Version,
};
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Read, Write};

/// One row of the song sequencer: a chain index per track (`0xFF` for none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongRow {
    pub tracks: [u8; Song::TRACK_COUNT],
}

impl SongRow {
    pub const EMPTY: Self = Self {
        tracks: [0xFF; Song::TRACK_COUNT],
    };

    /// The chain a track plays in this row, if any
    pub fn chain(&self, track: usize) -> Option<u8> {
        self.tracks.get(track).copied().filter(|chain| *chain != 0xFF)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for SongRow {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for SongRow {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            tracks: reader.read_bytes()?,
        })
    }
}

impl Encode for SongRow {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&self.tracks)
    }
}

/// A complete M8 song
///
/// The banks can be edited through their slices, but never grow or shrink: their lengths
/// are fixed by the file format.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    version: Version,

    pub name: Name<12>,
    pub directory: Name<128>,
    pub tempo: f32,
    pub transpose: u8,
    pub quantize: u8,
    pub key: u8,

    pub midi_settings: MidiSettings,
    pub mixer_settings: MixerSettings,
    pub effects_settings: EffectsSettings,

    grooves: Vec<Groove>,
    rows: Vec<SongRow>,
    phrases: Vec<Phrase>,
    chains: Vec<Chain>,
    tables: Vec<Table>,
    instruments: Vec<Instrument>,
    midi_mappings: Vec<MidiMapping>,
    scales: Vec<Scale>,
}

impl Song {
    pub const TRACK_COUNT: usize = 8;
    pub const ROW_COUNT: usize = 256;
    pub const GROOVE_COUNT: usize = 32;
    pub const PHRASE_COUNT: usize = 255;
    pub const CHAIN_COUNT: usize = 255;
    pub const TABLE_COUNT: usize = 256;
    pub const INSTRUMENT_COUNT: usize = 128;
    pub const MIDI_MAPPING_COUNT: usize = 128;
    pub const SCALE_COUNT: usize = 16;

    // Absolute file offsets, header included
    const DIRECTORY_OFFSET: u64 = 0x0E;
    const MIXER_SETTINGS_OFFSET: u64 = 0xCE;
    const GROOVES_OFFSET: u64 = 0xEE;
    const ROWS_OFFSET: u64 = 0x2EE;
    const PHRASES_OFFSET: u64 = 0xAEE;
    const CHAINS_OFFSET: u64 = 0x9A5E;
    const TABLES_OFFSET: u64 = 0xBA3E;
    const INSTRUMENTS_OFFSET: u64 = 0x13A3E;
    const EFFECTS_SETTINGS_OFFSET: u64 = 0x1A5C1;
    const MIDI_MAPPINGS_OFFSET: u64 = 0x1A5FE;
    const SCALES_OFFSET: u64 = 0x1AA7E;

    /// Create an empty song
    pub fn new(version: Version) -> Self {
        Self {
            version,
            name: Name::default(),
            directory: Name::default(),
            tempo: 120.0,
            transpose: 0,
            quantize: 0,
            key: 0,
            midi_settings: MidiSettings::default(),
            mixer_settings: MixerSettings::default(),
            effects_settings: EffectsSettings::default(),
            grooves: vec![Groove::default(); Self::GROOVE_COUNT],
            rows: vec![SongRow::EMPTY; Self::ROW_COUNT],
            phrases: vec![Phrase::default(); Self::PHRASE_COUNT],
            chains: vec![Chain::default(); Self::CHAIN_COUNT],
            tables: vec![Table::default(); Self::TABLE_COUNT],
            instruments: (0..Self::INSTRUMENT_COUNT)
                .map(|_| {
                    let mut instrument = Instrument::new(InstrumentKind::None, version);
                    instrument.table = None;
                    instrument
                })
                .collect(),
            midi_mappings: vec![MidiMapping::EMPTY; Self::MIDI_MAPPING_COUNT],
            scales: vec![Scale::default(); Self::SCALE_COUNT],
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn key_to_str(&self) -> String {
        key_to_str(self.key)
    }

    pub fn grooves(&self) -> &[Groove] {
        &self.grooves
    }

    pub fn grooves_mut(&mut self) -> &mut [Groove] {
        &mut self.grooves
    }

    /// The song sequencer rows
    pub fn rows(&self) -> &[SongRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [SongRow] {
        &mut self.rows
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn phrases_mut(&mut self) -> &mut [Phrase] {
        &mut self.phrases
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chains_mut(&mut self) -> &mut [Chain] {
        &mut self.chains
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut [Table] {
        &mut self.tables
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Mutable access to the instruments
    ///
    /// Instruments in a song carry no table of their own (see [`Song::tables()`]), and
    /// any table set on them is not saved.
    pub fn instruments_mut(&mut self) -> &mut [Instrument] {
        &mut self.instruments
    }

    pub fn midi_mappings(&self) -> &[MidiMapping] {
        &self.midi_mappings
    }

    pub fn midi_mappings_mut(&mut self) -> &mut [MidiMapping] {
        &mut self.midi_mappings
    }

    /// The song scales
    ///
    /// Songs written before [`Version::SONG_SCALES`] don't store these, and they are
    /// left at their default.
    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    pub fn scales_mut(&mut self) -> &mut [Scale] {
        &mut self.scales
    }
}

impl Decode for Song {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        let version = reader.version();

        reader.skip_to(Self::DIRECTORY_OFFSET)?;
        let directory = reader.read_name()?;
        let transpose = reader.read_u8()?;
        let tempo = reader.read_f32()?;
        let quantize = reader.read_u8()?;
        let name = reader.read_name()?;
        let midi_settings = reader.decode()?;
        let key = reader.read_u8()?;

        reader.skip_to(Self::MIXER_SETTINGS_OFFSET)?;
        let mixer_settings = reader.decode()?;

        trace!("Reading grooves at {:#X}", reader.position());
        reader.skip_to(Self::GROOVES_OFFSET)?;
        let grooves = reader.decode_vec(Self::GROOVE_COUNT)?;

        trace!("Reading song rows at {:#X}", reader.position());
        reader.skip_to(Self::ROWS_OFFSET)?;
        let rows = reader.decode_vec(Self::ROW_COUNT)?;

        trace!("Reading phrases at {:#X}", reader.position());
        reader.skip_to(Self::PHRASES_OFFSET)?;
        let phrases = reader.decode_vec(Self::PHRASE_COUNT)?;

        trace!("Reading chains at {:#X}", reader.position());
        reader.skip_to(Self::CHAINS_OFFSET)?;
        let chains = reader.decode_vec(Self::CHAIN_COUNT)?;

        trace!("Reading tables at {:#X}", reader.position());
        reader.skip_to(Self::TABLES_OFFSET)?;
        let tables = reader.decode_vec(Self::TABLE_COUNT)?;

        trace!("Reading instruments at {:#X}", reader.position());
        reader.skip_to(Self::INSTRUMENTS_OFFSET)?;
        let instruments = reader.decode_vec(Self::INSTRUMENT_COUNT)?;

        trace!("Reading effects settings at {:#X}", Self::EFFECTS_SETTINGS_OFFSET);
        reader.skip_to(Self::EFFECTS_SETTINGS_OFFSET)?;
        let effects_settings = reader.decode()?;

        trace!("Reading MIDI mappings at {:#X}", Self::MIDI_MAPPINGS_OFFSET);
        reader.skip_to(Self::MIDI_MAPPINGS_OFFSET)?;
        let midi_mappings = reader.decode_vec(Self::MIDI_MAPPING_COUNT)?;

        let scales = if version.at_least(&Version::SONG_SCALES) {
            trace!("Reading scales at {:#X}", Self::SCALES_OFFSET);
            reader.skip_to(Self::SCALES_OFFSET)?;
            reader.decode_vec(Self::SCALE_COUNT)?
        } else {
            vec![Scale::default(); Self::SCALE_COUNT]
        };

        Ok(Self {
            version,
            name,
            directory,
            tempo,
            transpose,
            quantize,
            key,
            midi_settings,
            mixer_settings,
            effects_settings,
            grooves,
            rows,
            phrases,
            chains,
            tables,
            instruments,
            midi_mappings,
            scales,
        })
    }
}

impl Encode for Song {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.pad_to(Self::DIRECTORY_OFFSET)?;
        writer.write_name(&self.directory)?;
        writer.write_u8(self.transpose)?;
        writer.write_f32(self.tempo)?;
        writer.write_u8(self.quantize)?;
        writer.write_name(&self.name)?;
        writer.encode(&self.midi_settings)?;
        writer.write_u8(self.key)?;

        writer.pad_to(Self::MIXER_SETTINGS_OFFSET)?;
        writer.encode(&self.mixer_settings)?;

        writer.pad_to(Self::GROOVES_OFFSET)?;
        writer.encode(&self.grooves)?;

        writer.pad_to(Self::ROWS_OFFSET)?;
        writer.encode(&self.rows)?;

        writer.pad_to(Self::PHRASES_OFFSET)?;
        writer.encode(&self.phrases)?;

        writer.pad_to(Self::CHAINS_OFFSET)?;
        writer.encode(&self.chains)?;

        writer.pad_to(Self::TABLES_OFFSET)?;
        writer.encode(&self.tables)?;

        writer.pad_to(Self::INSTRUMENTS_OFFSET)?;
        writer.encode(&self.instruments)?;

        writer.pad_to(Self::EFFECTS_SETTINGS_OFFSET)?;
        writer.encode(&self.effects_settings)?;

        writer.pad_to(Self::MIDI_MAPPINGS_OFFSET)?;
        writer.encode(&self.midi_mappings)?;

        if writer.version().at_least(&Version::SONG_SCALES) {
            writer.pad_to(Self::SCALES_OFFSET)?;
            writer.encode(&self.scales)?;
        }

        Ok(())
    }
}

impl Projection for Song {
    fn object_properties(&self) -> Vec<&'static str> {
        vec![
            "name",
            "directory",
            "tempo",
            "transpose",
            "quantize",
            "key",
            "midiSettings",
            "mixerSettings",
            "effectsSettings",
            "grooves",
            "songSteps",
            "phrases",
            "chains",
            "tables",
            "instruments",
            "midiMappings",
            "scales",
        ]
    }

    fn to_object(&self) -> Object {
        let instruments = self
            .instruments
            .iter()
            .map(|instrument| Value::Object(instrument.to_object()))
            .collect();

        let mut object = Object::new();
        object.insert("name".into(), to_value(&self.name));
        object.insert("directory".into(), to_value(&self.directory));
        object.insert("tempo".into(), to_value(&self.tempo));
        object.insert("transpose".into(), self.transpose.into());
        object.insert("quantize".into(), self.quantize.into());
        object.insert("key".into(), self.key.into());
        object.insert("midiSettings".into(), to_value(&self.midi_settings));
        object.insert("mixerSettings".into(), to_value(&self.mixer_settings));
        object.insert("effectsSettings".into(), to_value(&self.effects_settings));
        object.insert("grooves".into(), to_value(&self.grooves));
        object.insert("songSteps".into(), to_value(&self.rows));
        object.insert("phrases".into(), to_value(&self.phrases));
        object.insert("chains".into(), to_value(&self.chains));
        object.insert("tables".into(), to_value(&self.tables));
        object.insert("instruments".into(), Value::Array(instruments));
        object.insert("midiMappings".into(), to_value(&self.midi_mappings));
        object.insert("scales".into(), to_value(&self.scales));
        object
    }

    fn from_object(object: &Object, version: Version) -> Result<Self, FromObjectError> {
        let instruments = list_field::<Object>(object, "instruments", Self::INSTRUMENT_COUNT)?
            .iter()
            .map(|instrument| Instrument::from_object(instrument, version))
            .collect::<Result<Vec<_>, FromObjectError>>()?;

        Ok(Self {
            version,
            name: field(object, "name")?,
            directory: field(object, "directory")?,
            tempo: field(object, "tempo")?,
            transpose: field(object, "transpose")?,
            quantize: field(object, "quantize")?,
            key: field(object, "key")?,
            midi_settings: field(object, "midiSettings")?,
            mixer_settings: field(object, "mixerSettings")?,
            effects_settings: field(object, "effectsSettings")?,
            grooves: list_field(object, "grooves", Self::GROOVE_COUNT)?,
            rows: list_field(object, "songSteps", Self::ROW_COUNT)?,
            phrases: list_field(object, "phrases", Self::PHRASE_COUNT)?,
            chains: list_field(object, "chains", Self::CHAIN_COUNT)?,
            tables: list_field(object, "tables", Self::TABLE_COUNT)?,
            instruments,
            midi_mappings: list_field(object, "midiMappings", Self::MIDI_MAPPING_COUNT)?,
            scales: list_field(object, "scales", Self::SCALE_COUNT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::Fx;
    use std::io::Cursor;

    fn round_trip(song: &Song) -> (Vec<u8>, Song) {
        let mut bytes = Vec::new();
        song.encode(&mut Writer::new(&mut bytes, song.version(), Song::DIRECTORY_OFFSET))
            .unwrap();

        let decoded = Song::decode(&mut Reader::new(
            Cursor::new(&bytes),
            song.version(),
            Song::DIRECTORY_OFFSET,
        ))
        .unwrap();

        (bytes, decoded)
    }

    #[test]
    fn section_offsets() {
        let mut song = Song::new(Version::LATEST);
        song.name = "OFFSETS".parse().unwrap();
        song.tempo = 140.5;
        song.grooves_mut()[0].steps[2] = 3;
        song.rows_mut()[0].tracks[0] = 0x01;
        song.phrases_mut()[0].steps[0].note = 0x24;
        song.chains_mut()[0].steps[0].phrase = 0x02;
        song.tables_mut()[0].steps[0].volume = 0x33;
        song.instruments_mut()[0] = Instrument::new(InstrumentKind::MacroSynth, Version::LATEST);
        song.instruments_mut()[0].table = None;
        song.effects_settings.chorus_mod_depth = 0x11;
        song.midi_mappings_mut()[0].control_number = 0x07;
        song.scales_mut()[0].name = "BLUES".parse().unwrap();

        let (bytes, decoded) = round_trip(&song);

        // The header is not part of the song, so offsets are shifted by its size
        let at = |offset: u64| bytes[(offset - Song::DIRECTORY_OFFSET) as usize];

        let tempo = (0x8F - Song::DIRECTORY_OFFSET) as usize;
        assert_eq!(&bytes[tempo..tempo + 4], &140.5f32.to_le_bytes());
        assert_eq!(at(0x94), b'O');
        assert_eq!(at(Song::GROOVES_OFFSET + 2), 3);
        assert_eq!(at(Song::ROWS_OFFSET), 0x01);
        assert_eq!(at(Song::PHRASES_OFFSET), 0x24);
        assert_eq!(at(Song::CHAINS_OFFSET), 0x02);
        assert_eq!(at(Song::TABLES_OFFSET + 1), 0x33);
        assert_eq!(at(Song::INSTRUMENTS_OFFSET), 0x01);
        assert_eq!(at(Song::INSTRUMENTS_OFFSET + Instrument::BLOCK_LEN), 0xFF);
        assert_eq!(at(Song::EFFECTS_SETTINGS_OFFSET), 0x11);
        assert_eq!(at(Song::MIDI_MAPPINGS_OFFSET + 1), 0x07);
        assert_eq!(at(Song::SCALES_OFFSET + 26), b'B');
        assert_eq!(
            bytes.len() as u64,
            Song::SCALES_OFFSET + 16 * Scale::LEN - Song::DIRECTORY_OFFSET
        );

        assert_eq!(decoded, song);
    }

    #[test]
    fn scales_need_2_5() {
        let version = Version::new(2, 4, 0).unwrap();
        let mut song = Song::new(version);
        song.phrases_mut()[3].steps[0].fx[0] = Fx {
            command: 0x12,
            value: 0x01,
        };

        let (bytes, decoded) = round_trip(&song);
        assert_eq!(bytes.len() as u64, Song::SCALES_OFFSET - Song::DIRECTORY_OFFSET);
        assert_eq!(decoded.scales(), song.scales());
        assert_eq!(decoded, song);
    }

    #[test]
    fn object_round_trip() {
        let mut song = Song::new(Version::LATEST);
        song.name = "JSON".parse().unwrap();
        song.tempo = 133.25;
        song.instruments_mut()[4] = Instrument::new(InstrumentKind::FmSynth, Version::LATEST);
        song.instruments_mut()[4].table = None;
        song.rows_mut()[1].tracks[3] = 0x10;

        let object = song.to_object();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, song.object_properties());

        let restored = Song::from_object(&object, Version::LATEST).unwrap();
        assert_eq!(restored, song);
    }

    #[test]
    fn song_rows() {
        let mut row = SongRow::EMPTY;
        assert!(row.is_empty());
        assert_eq!(row.chain(0), None);

        row.tracks[7] = 0x20;
        assert_eq!(row.chain(7), Some(0x20));
        assert_eq!(row.chain(8), None);
    }
}
