use super::Encode;
use crate::{name::Name, version::Version};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Sequential writer producing M8 file data
///
/// The counterpart of [`Reader`](super::Reader): it carries the [`Version`] being written
/// and tracks the stream position so gaps in the layout can be padded.
pub struct Writer<W> {
    inner: W,
    version: Version,
    position: u64,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Wrap an I/O writer that sits at absolute stream offset `position`
    pub fn new(inner: W, version: Version, position: u64) -> Self {
        Self {
            inner,
            version,
            position,
        }
    }

    /// The version of the file being written
    pub fn version(&self) -> Version {
        self.version
    }

    /// The absolute offset of the next byte to be written
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_u8(value)?;
        self.position += 1;
        Ok(())
    }

    /// Write a flag as `1` or `0`
    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.write_u8(value.into())
    }

    /// Write a little-endian 16-bit integer
    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_u16::<LittleEndian>(value)?;
        self.position += 2;
        Ok(())
    }

    /// Write a little-endian 32-bit float
    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.position += 4;
        Ok(())
    }

    /// Write a run of bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write a fixed-width name field, zero-padded
    pub fn write_name<const N: usize>(&mut self, name: &Name<N>) -> io::Result<()> {
        self.write_bytes(name.bytes())
    }

    /// Encode any value implementing [`Encode`]
    pub fn encode<T>(&mut self, value: &T) -> io::Result<()>
    where
        T: Encode + ?Sized,
    {
        value.encode(self)
    }

    /// Fill with `byte` up until absolute offset `offset`
    pub fn fill_to(&mut self, offset: u64, byte: u8) -> io::Result<()> {
        let count = offset.checked_sub(self.position).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "cannot pad back from offset {:#X} to {offset:#X}",
                    self.position
                ),
            )
        })?;

        for _ in 0..count {
            self.write_u8(byte)?;
        }

        Ok(())
    }

    /// Zero-pad up until absolute offset `offset`
    pub fn pad_to(&mut self, offset: u64) -> io::Result<()> {
        self.fill_to(offset, 0)
    }

    /// Unwrap the underlying I/O writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
