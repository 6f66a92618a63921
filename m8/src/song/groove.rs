use crate::codec::{Decode, Encode, Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// A swing pattern: the number of ticks each step lasts
///
/// Unused steps hold `0xFF`. The sequencer loops over the used ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Groove {
    pub steps: [u8; 16],
}

impl Groove {
    pub const UNUSED: u8 = 0xFF;

    /// The steps that are in use
    pub fn active_steps(&self) -> impl Iterator<Item = u8> + '_ {
        self.steps
            .iter()
            .copied()
            .take_while(|step| *step != Self::UNUSED)
    }
}

impl Default for Groove {
    fn default() -> Self {
        let mut steps = [Self::UNUSED; 16];
        steps[0] = 6;
        steps[1] = 6;

        Self { steps }
    }
}

impl Decode for Groove {
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read,
    {
        Ok(Self {
            steps: reader.read_bytes()?,
        })
    }
}

impl Encode for Groove {
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_bytes(&self.steps)
    }
}
