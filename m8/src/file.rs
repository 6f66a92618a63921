//! M8 files: the common header and the body it announces

use crate::{
    codec::{Reader, Writer},
    instrument::Instrument,
    object::{FromObjectError, Object, Projection, field},
    scale::Scale,
    song::{Song, Table},
    theme::Theme,
    version::Version,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use serde_json::json;
use std::{
    fmt,
    io::{self, Cursor, Read, Write},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// The kinds of file the M8 writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Song,
    Instrument,
    Theme,
    Scale,
}

impl FileKind {
    pub const ALL: [Self; 4] = [Self::Song, Self::Instrument, Self::Theme, Self::Scale];

    /// The byte stored in the header
    pub fn byte(&self) -> u8 {
        match self {
            Self::Song => 0x00,
            Self::Instrument => 0x10,
            Self::Theme => 0x20,
            Self::Scale => 0x30,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.byte() == byte)
    }

    /// The extension files of this kind are saved with, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Song => "m8s",
            Self::Instrument => "m8i",
            Self::Theme => "m8t",
            Self::Scale => "m8n",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(extension))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Song => "Song",
            Self::Instrument => "Instrument",
            Self::Theme => "Theme",
            Self::Scale => "Scale",
        };

        write!(f, "{name}")
    }
}

impl FromStr for FileKind {
    type Err = FromObjectError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == text)
            .ok_or_else(|| FromObjectError::UnknownKind(text.to_owned()))
    }
}

/// The contents of an [`M8File`]
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Song(Box<Song>),
    Instrument(Box<Instrument>),
    Theme(Theme),
    Scale(Scale),
}

impl Body {
    pub fn kind(&self) -> FileKind {
        match self {
            Self::Song(_) => FileKind::Song,
            Self::Instrument(_) => FileKind::Instrument,
            Self::Theme(_) => FileKind::Theme,
            Self::Scale(_) => FileKind::Scale,
        }
    }
}

/// A song, instrument, theme or scale, as saved by the M8
///
/// Every file starts with the same 14-byte header: the magic `M8VERSION`, the firmware
/// version that wrote the file and the kind of file. The body follows.
///
/// The kind and version are fixed once a file is created. The body can be edited
/// through [`M8File::body_mut()`], but not swapped for a different kind.
///
/// ```no_run
/// # use m8::file::{Body, M8File};
/// let file = M8File::from_path("Songs/demo.m8s")?;
/// if let Body::Song(song) = file.body() {
///     println!("{} at {} BPM", song.name, song.tempo);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct M8File {
    version: Version,
    body: Body,
}

impl M8File {
    /// The magic bytes every M8 file starts with
    pub const MAGIC: [u8; 9] = *b"M8VERSION";

    /// The size of the header
    pub const HEADER_LEN: u64 = 14;

    pub fn new(version: Version, body: Body) -> Self {
        Self { version, body }
    }

    pub fn kind(&self) -> FileKind {
        self.body.kind()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> BodyMut<'_> {
        match &mut self.body {
            Body::Song(song) => BodyMut::Song(song),
            Body::Instrument(instrument) => BodyMut::Instrument(instrument),
            Body::Theme(theme) => BodyMut::Theme(theme),
            Body::Scale(scale) => BodyMut::Scale(scale),
        }
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    /// Deserialize a file from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let (version, kind) = read_header(&mut reader)?;
        debug!("Decoding {kind} file written by firmware {version}");

        let mut reader = Reader::new(reader, version, Self::HEADER_LEN);
        let body = match kind {
            FileKind::Song => Body::Song(Box::new(reader.decode()?)),
            FileKind::Instrument => {
                let mut instrument: Instrument = reader.decode()?;
                instrument.table = Some(reader.decode()?);
                Body::Instrument(Box::new(instrument))
            }
            FileKind::Theme => Body::Theme(reader.decode()?),
            FileKind::Scale => Body::Scale(reader.decode()?),
        };

        Ok(Self { version, body })
    }

    /// Deserialize a file from a byte slice
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FromReaderError> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Deserialize a file from a path on disk
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = std::fs::File::open(path)?;
        Ok(Self::from_reader(io::BufReader::new(file))?)
    }

    /// Serialize the file to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        write_header(&mut writer, self.version, self.kind())?;

        let mut writer = Writer::new(writer, self.version, Self::HEADER_LEN);
        match &self.body {
            Body::Song(song) => writer.encode(&**song),
            Body::Instrument(instrument) => {
                writer.encode(&**instrument)?;
                match &instrument.table {
                    Some(table) => writer.encode(table),
                    None => writer.encode(&Table::default()),
                }
            }
            Body::Theme(theme) => writer.encode(theme),
            Body::Scale(scale) => writer.encode(scale),
        }
    }

    /// Serialize the file to a byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let mut bytes = Vec::new();
        self.to_writer(&mut bytes)?;
        Ok(bytes)
    }

    /// Serialize the file to a path on disk
    pub fn to_path<P>(&self, path: P) -> Result<(), io::Error>
    where
        P: AsRef<Path>,
    {
        let mut writer = io::BufWriter::new(std::fs::File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()
    }

    /// Project the body onto an object
    ///
    /// Unless `skip_header` is set, the object also carries a `fileMetadata` entry with
    /// the kind and version, which is what [`M8File::from_object()`] needs to rebuild the
    /// file.
    pub fn to_object(&self, skip_header: bool) -> Object {
        let mut object = Object::new();

        if !skip_header {
            object.insert(
                "fileMetadata".into(),
                json!({
                    "type": self.kind().to_string(),
                    "version": self.version.to_string(),
                }),
            );
        }

        let body = match &self.body {
            Body::Song(song) => song.to_object(),
            Body::Instrument(instrument) => instrument.to_object(),
            Body::Theme(theme) => theme.to_object(),
            Body::Scale(scale) => scale.to_object(),
        };
        object.extend(body);

        object
    }

    /// Rebuild a file from an object that includes the `fileMetadata` entry
    pub fn from_object(object: &Object) -> Result<Self, FromObjectError> {
        let metadata: Object = field(object, "fileMetadata")?;
        let kind: FileKind = field::<String>(&metadata, "type")?.parse()?;
        let version: Version = field::<String>(&metadata, "version")?.parse()?;

        let body = match kind {
            FileKind::Song => Body::Song(Box::new(Song::from_object(object, version)?)),
            FileKind::Instrument => {
                Body::Instrument(Box::new(Instrument::from_object(object, version)?))
            }
            FileKind::Theme => Body::Theme(Theme::from_object(object, version)?),
            FileKind::Scale => Body::Scale(Scale::from_object(object, version)?),
        };

        Ok(Self { version, body })
    }
}

/// Mutable access to the body of an [`M8File`], without being able to change its kind
#[derive(Debug)]
pub enum BodyMut<'a> {
    Song(&'a mut Song),
    Instrument(&'a mut Instrument),
    Theme(&'a mut Theme),
    Scale(&'a mut Scale),
}

/// Read the 14-byte header that starts every file
pub fn read_header<R>(mut reader: R) -> Result<(Version, FileKind), FromReaderError>
where
    R: Read,
{
    let mut magic = [0; 9];
    reader.read_exact(&mut magic)?;
    if magic != M8File::MAGIC {
        return Err(FromReaderError::MalformedHeader);
    }

    reader.read_u8()?;
    let version = Version::from_packed(reader.read_u16::<LittleEndian>()?);
    reader.read_u8()?;

    let byte = reader.read_u8()?;
    let kind = FileKind::from_byte(byte).ok_or(FromReaderError::UnknownFileKind(byte))?;

    Ok((version, kind))
}

fn write_header<W>(mut writer: W, version: Version, kind: FileKind) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&M8File::MAGIC)?;
    writer.write_u8(0)?;
    writer.write_u16::<LittleEndian>(version.packed())?;
    writer.write_u8(0)?;
    writer.write_u8(kind.byte())
}

/// Errors that might be returned from [`M8File::from_reader()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// Any failure that has to do with I/O, including files that are cut short
    #[error("Something failed with I/O")]
    Read(#[from] io::Error),

    /// The file doesn't start with `M8VERSION`
    #[error("The file does not start with an M8 header")]
    MalformedHeader,

    /// The header names a kind of file this crate doesn't know
    #[error("Unknown file kind {0:#04X}")]
    UnknownFileKind(u8),
}

/// Errors that might be returned from [`M8File::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Could not open the file for reading
    #[error("Could not open the file for reading")]
    FileOpen(#[from] io::Error),

    /// Deserialization from the file failed
    #[error("Reading the M8 file failed")]
    Read(#[from] FromReaderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::InstrumentKind;

    fn header(version: [u8; 2], kind: u8) -> Vec<u8> {
        let mut bytes = b"M8VERSION\0".to_vec();
        bytes.extend(version);
        bytes.extend([0, kind]);
        bytes
    }

    #[test]
    fn header_layout() {
        let file = M8File::new(
            Version::new(2, 7, 1).unwrap(),
            Body::Theme(Theme::default()),
        );
        let bytes = file.to_bytes().unwrap();

        assert_eq!(&bytes[..14], header([0x71, 0x02], 0x20).as_slice());
        assert_eq!(bytes.len() as u64, M8File::HEADER_LEN + Theme::LEN);
        assert_eq!(M8File::from_bytes(&bytes).unwrap(), file);
    }

    #[test]
    fn malformed_header() {
        let mut bytes = header([0x00, 0x03], 0x00);
        bytes[0] = b'X';

        assert!(matches!(
            M8File::from_bytes(&bytes),
            Err(FromReaderError::MalformedHeader)
        ));
    }

    #[test]
    fn unknown_file_kind() {
        let bytes = header([0x00, 0x03], 0x40);

        assert!(matches!(
            M8File::from_bytes(&bytes),
            Err(FromReaderError::UnknownFileKind(0x40))
        ));
    }

    #[test]
    fn truncated_body() {
        let mut bytes = header([0x00, 0x03], 0x30);
        bytes.extend([0xFF; 10]);

        assert!(matches!(
            M8File::from_bytes(&bytes),
            Err(FromReaderError::Read(_))
        ));
    }

    #[test]
    fn instrument_files_carry_a_table() {
        let mut instrument = Instrument::new(InstrumentKind::WavSynth, Version::LATEST);
        instrument.table = None;

        let file = M8File::new(Version::LATEST, Body::Instrument(Box::new(instrument)));
        let bytes = file.to_bytes().unwrap();
        assert_eq!(
            bytes.len() as u64,
            M8File::HEADER_LEN + Instrument::BLOCK_LEN + Table::LEN
        );

        let decoded = M8File::from_bytes(&bytes).unwrap();
        let Body::Instrument(decoded) = decoded.body() else {
            panic!("not an instrument");
        };
        assert_eq!(decoded.table, Some(Table::default()));
    }

    #[test]
    fn instruments_of_newer_kinds_are_saved_unchanged() {
        let instrument = Instrument::new(InstrumentKind::Unknown(0x05), Version::LATEST);
        let file = M8File::new(Version::LATEST, Body::Instrument(Box::new(instrument)));

        let mut bytes = file.to_bytes().unwrap();
        let block = M8File::HEADER_LEN as usize;
        bytes[block + 0x12..block + 0x57].fill(0x11);

        let decoded = M8File::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn body_can_be_edited_in_place() {
        let mut file = M8File::new(Version::LATEST, Body::Scale(Scale::default()));

        if let BodyMut::Scale(scale) = file.body_mut() {
            scale.name = "EDITED".parse().unwrap();
        }

        assert_eq!(file.kind(), FileKind::Scale);
        let Body::Scale(scale) = file.body() else {
            panic!("not a scale");
        };
        assert_eq!(scale.name.as_str(), "EDITED");
    }

    #[test]
    fn kinds() {
        for kind in FileKind::ALL {
            assert_eq!(FileKind::from_byte(kind.byte()), Some(kind));
            assert_eq!(FileKind::from_extension(kind.extension()), Some(kind));
            assert_eq!(kind.to_string().parse::<FileKind>().unwrap(), kind);
        }

        assert_eq!(FileKind::from_extension("M8S"), Some(FileKind::Song));
        assert_eq!(FileKind::from_extension("wav"), None);
    }

    #[test]
    fn object_metadata() {
        let file = M8File::new(Version::LATEST, Body::Scale(Scale::default()));

        let object = file.to_object(false);
        assert_eq!(object.keys().next().map(String::as_str), Some("fileMetadata"));
        assert_eq!(object["fileMetadata"]["type"], "Scale");
        assert_eq!(object["fileMetadata"]["version"], "3.0.0");
        assert_eq!(M8File::from_object(&object).unwrap(), file);

        let skipped = file.to_object(true);
        assert!(!skipped.contains_key("fileMetadata"));
        assert!(matches!(
            M8File::from_object(&skipped),
            Err(FromObjectError::MissingKey("fileMetadata"))
        ));
    }
}
