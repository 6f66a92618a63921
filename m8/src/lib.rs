//! Reading and writing of the files made by the [Dirtywave M8](https://dirtywave.com) tracker
//!
//! The M8 stores songs (`.m8s`), instruments (`.m8i`), scales (`.m8n`) and themes (`.m8t`)
//! as fixed-layout binary files on its SD card. [`M8File`](file::M8File) is the entry point:
//! it parses the header, reads the body laid out according to the firmware version that
//! wrote it, and writes it back byte for byte.
//!
//! ```no_run
//! use m8::file::{Body, M8File};
//!
//! let file = M8File::from_path("DEMO.m8s")?;
//! if let Body::Song(song) = file.body() {
//!     println!("{} at {} BPM", song.name, song.tempo);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Every entity can also be projected onto a JSON-style object through
//! [`Projection`](object::Projection), which is what the tools use for export and import.
//!
//! This crate does not talk to the device itself, nor does it play anything back.

pub mod codec;
pub mod display;
pub mod file;
pub mod fx;
pub mod instrument;
pub mod name;
pub mod object;
pub mod scale;
pub mod song;
pub mod theme;
pub mod version;

pub use ux::u4;
