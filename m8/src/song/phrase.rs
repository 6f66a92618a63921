//! Phrases: the 16-step note patterns everything else is built out of

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::{hex_or_empty, note_to_str},
    fx::Fx,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A single row in a [`Phrase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseStep {
    pub note: u8,
    pub volume: u8,

    /// The index of the instrument to play, or `0xFF` to keep the one playing before
    pub instrument: u8,

    pub fx: [Fx; 3],
}

impl PhraseStep {
    pub const EMPTY: Self = Self {
        note: 0xFF,
        volume: 0xFF,
        instrument: 0xFF,
        fx: [Fx::EMPTY; 3],
    };

    /// The value of [`PhraseStep::instrument`] when the step doesn't name one
    pub const NO_INSTRUMENT: u8 = 0xFF;

    /// The instrument this step names explicitly, if any
    pub fn instrument(&self) -> Option<u8> {
        match self.instrument {
            Self::NO_INSTRUMENT => None,
            instrument => Some(instrument),
        }
    }

    /// Render the note, e.g. `C-4`, `OFF` or `---`
    pub fn note_to_str(&self) -> String {
        note_to_str(self.note)
    }

    pub fn volume_to_str(&self) -> String {
        hex_or_empty(self.volume)
    }

    pub fn instrument_to_str(&self) -> String {
        hex_or_empty(self.instrument)
    }
}

impl Default for PhraseStep {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for PhraseStep {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            note: reader.read_u8()?,
            volume: reader.read_u8()?,
            instrument: reader.read_u8()?,
            fx: reader.decode_array()?,
        })
    }
}

impl Encode for PhraseStep {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&[self.note, self.volume, self.instrument])?;
        writer.encode(&self.fx)
    }
}

/// A 16-step pattern of notes and effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrase {
    pub steps: [PhraseStep; 16],
}

impl Phrase {
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|step| *step == PhraseStep::EMPTY)
    }

    /// Scan backwards from (and including) a step for the nearest explicit instrument
    pub(crate) fn last_instrument_at(&self, step: usize) -> Option<u8> {
        self.steps
            .iter()
            .take(step.saturating_add(1))
            .rev()
            .find_map(PhraseStep::instrument)
    }
}

impl Decode for Phrase {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            steps: reader.decode_array()?,
        })
    }
}

impl Encode for Phrase {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.encode(&self.steps)
    }
}
