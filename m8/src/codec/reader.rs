use super::Decode;
use crate::{name::Name, version::Version};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Sequential, forward-only reader over M8 file data
///
/// The reader knows the [`Version`] of the file it's reading, so that nested
/// [`Decode`] implementations can pick the layout the firmware used.
pub struct Reader<R> {
    inner: R,
    version: Version,
    position: u64,
}

impl<R> Reader<R>
where
    R: Read,
{
    /// Wrap an I/O reader that sits at absolute stream offset `position`
    pub fn new(inner: R, version: Version, position: u64) -> Self {
        Self {
            inner,
            version,
            position,
        }
    }

    /// The version of the file being read
    pub fn version(&self) -> Version {
        self.version
    }

    /// The absolute offset of the next byte to be read
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> io::Result<u8> {
        let byte = self.inner.read_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a byte as a flag, where anything non-zero is `true`
    pub fn read_bool(&mut self) -> io::Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a little-endian 16-bit integer
    pub fn read_u16(&mut self) -> io::Result<u16> {
        let value = self.inner.read_u16::<LittleEndian>()?;
        self.position += 2;
        Ok(value)
    }

    /// Read a little-endian 32-bit float
    pub fn read_f32(&mut self) -> io::Result<f32> {
        let value = self.inner.read_f32::<LittleEndian>()?;
        self.position += 4;
        Ok(value)
    }

    /// Read a fixed amount of bytes
    pub fn read_bytes<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut bytes = [0; N];
        self.inner.read_exact(&mut bytes)?;
        self.position += N as u64;
        Ok(bytes)
    }

    /// Read a fixed-width name field
    pub fn read_name<const N: usize>(&mut self) -> io::Result<Name<N>> {
        Ok(Name::from_field(self.read_bytes()?))
    }

    /// Decode a value of any type implementing [`Decode`]
    pub fn decode<T>(&mut self) -> io::Result<T>
    where
        T: Decode,
    {
        T::decode(self)
    }

    /// Decode `N` consecutive values into an array
    pub fn decode_array<T, const N: usize>(&mut self) -> io::Result<[T; N]>
    where
        T: Decode,
    {
        let items = self.decode_vec(N)?;
        items
            .try_into()
            .map_err(|_| io::Error::other("decoded an unexpected number of items"))
    }

    /// Decode `count` consecutive values
    pub fn decode_vec<T>(&mut self, count: usize) -> io::Result<Vec<T>>
    where
        T: Decode,
    {
        (0..count).map(|_| self.decode()).collect()
    }

    /// Discard bytes up until absolute offset `offset`
    ///
    /// Decoding never goes back: asking for an offset that has already been passed is an
    /// error, because it means the layout tables disagree with each other.
    pub fn skip_to(&mut self, offset: u64) -> io::Result<()> {
        let count = offset.checked_sub(self.position).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "cannot skip back from offset {:#X} to {offset:#X}",
                    self.position
                ),
            )
        })?;

        let skipped = io::copy(&mut (&mut self.inner).take(count), &mut io::sink())?;
        self.position += skipped;

        if skipped < count {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }

        Ok(())
    }

    /// Discard `count` bytes
    pub fn skip(&mut self, count: u64) -> io::Result<()> {
        self.skip_to(self.position + count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn primitives() {
        let bytes = [0x05, 0x00, 0x34, 0x12, 0x00, 0x00, 0xF0, 0x42];
        let mut reader = Reader::new(Cursor::new(bytes), Version::LATEST, 0);

        assert_eq!(reader.read_u8().unwrap(), 5);
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_f32().unwrap(), 120.0);
        assert_eq!(reader.position(), 8);
        assert!(reader.read_u8().is_err());
    }

    #[test]
    fn skip() {
        let mut reader = Reader::new(Cursor::new([1, 2, 3, 4, 5]), Version::LATEST, 10);

        reader.skip_to(12).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 3);
        assert_eq!(reader.position(), 13);

        let error = reader.skip_to(11).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);

        let error = reader.skip(5).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn name() {
        let mut reader = Reader::new(Cursor::new(*b"KICK\0\0"), Version::LATEST, 0);
        let name: Name<6> = reader.read_name().unwrap();
        assert_eq!(name.as_str(), "KICK");
        assert_eq!(reader.position(), 6);
    }
}
