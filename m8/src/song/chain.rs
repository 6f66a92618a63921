//! Chains: sequences of phrases

use crate::{
    codec::{Decode, Encode, Reader, Writer},
    display::{hex, hex_or_empty},
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A single row in a [`Chain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    /// The index of the phrase to play, or `0xFF` for none
    pub phrase: u8,
    pub transpose: u8,
}

impl ChainStep {
    pub const EMPTY: Self = Self {
        phrase: 0xFF,
        transpose: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.phrase == Self::EMPTY.phrase
    }

    pub fn phrase_to_str(&self) -> String {
        hex_or_empty(self.phrase)
    }

    pub fn transpose_to_str(&self) -> String {
        hex(self.transpose)
    }
}

impl Default for ChainStep {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Decode for ChainStep {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            phrase: reader.read_u8()?,
            transpose: reader.read_u8()?,
        })
    }
}

impl Encode for ChainStep {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_u8(self.phrase)?;
        writer.write_u8(self.transpose)
    }
}

/// A 16-step sequence of phrases, each with its own transposition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    pub steps: [ChainStep; 16],
}

impl Chain {
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(ChainStep::is_empty)
    }
}

impl Decode for Chain {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            steps: reader.decode_array()?,
        })
    }
}

impl Encode for Chain {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.encode(&self.steps)
    }
}
