//! Version-aware reading and writing of the M8 binary layout
//!
//! Every structure in an M8 file is a fixed-size run of bytes at a fixed (or
//! version-shifted) offset. [`Reader`] and [`Writer`] wrap an I/O stream, remember the
//! [`Version`](crate::version::Version) of the file being processed and track the stream
//! position, so that the [`Decode`] and [`Encode`] implementations throughout this crate
//! can lay themselves out the way the firmware that wrote the file did.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use std::io::{self, Read, Write};

/// Anything that can be read from M8 file data
pub trait Decode: Sized {
    /// Read `Self` from the current position of the reader
    fn decode<R>(reader: &mut Reader<R>) -> io::Result<Self>
    where
        R: Read;
}

/// Anything that can be written as M8 file data
pub trait Encode {
    /// Write `self` at the current position of the writer
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write;
}

impl<T, const N: usize> Encode for [T; N]
where
    T: Encode,
{
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T> Encode for Vec<T>
where
    T: Encode,
{
    fn encode<W>(&self, writer: &mut Writer<W>) -> io::Result<()>
    where
        W: Write,
    {
        self.iter().try_for_each(|item| item.encode(writer))
    }
}
