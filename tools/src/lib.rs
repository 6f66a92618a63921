//! # M8 Tools
//!
//! The [Dirtywave M8](https://dirtywave.com) is a handheld music tracker. It stores its songs,
//! instruments, scales and themes as binary files on an SD card, which makes them hard to
//! read, diff or edit outside of the device. This crate provides a command-line utility that
//! helps with exactly that.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see what the library does while reading files.
//!
//! ## Inspect
//!
//! ```console
//! m8-tools-inspect 0.1.0
//! Inspect M8 files, or even entire directories for their contents
//!
//! USAGE:
//!     m8-tools inspect [OPTIONS] [PATH]...
//!
//! ARGS:
//!     <PATH>...    The path(s) to inspect
//!
//! OPTIONS:
//!     -h, --help         Print help information
//!     -r, --recursive    Search the folder recursively
//!     -V, --version      Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! 4ntler@mbp > m8-tools inspect -r Songs
//! Songs/BANGER.m8s                         | Song       | 3.0.0  | BANGER
//! Songs/Instruments/KICK.m8i               | Instrument | 3.0.0  | KICK
//! Songs/Scales/DORIAN.m8n                  | Scale      | 2.7.0  | DORIAN
//! ```
//!
//! ## Export
//!
//! ```console
//! m8-tools-export 0.1.0
//! Export an M8 file to JSON
//!
//! USAGE:
//!     m8-tools export [OPTIONS] <PATH>
//!
//! OPTIONS:
//!     -f, --force              Overwrite the output file if it already exists
//!     -o, --output <OUTPUT>    The destination path
//!         --skip-header        Leave out the file metadata (kind and version)
//! ```
//!
//! ## Import
//!
//! ```console
//! m8-tools-import 0.1.0
//! Rebuild an M8 file from exported JSON
//!
//! USAGE:
//!     m8-tools import [OPTIONS] <JSON>
//!
//! OPTIONS:
//!     -f, --force              Overwrite the output file if it already exists
//!     -o, --output <OUTPUT>    The output path
//! ```
//!
//! ## View
//!
//! ```console
//! 4ntler@mbp > m8-tools view phrase BANGER.m8s 4
//! PHRASE 04
//!   N   V  I  FX1    FX2    FX3
//! 0 C-4 -- 02 PLY 01 --- 00 --- 00
//! 1 --- -- -- --- 00 --- 00 --- 00
//! ```
//!
//! `view` understands `song`, `chain`, `phrase`, `table`, `instrument`, `scale` and
//! `theme`. Indices are checked before the file is even opened.

pub mod export;
pub mod import;
pub mod inspect;
pub(crate) mod utils;
pub mod view;
