//! The `inspect` subcommand

use crate::utils::{iter_files, load};
use anyhow::Result;
use clap::Args;
use m8::file::{Body, M8File};
use std::path::PathBuf;

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Inspect M8 files, or even entire directories for their contents",
    long_about = None
)]
pub struct InspectArgs {
    /// The path(s) to inspect
    path: Vec<PathBuf>,

    /// Search the folder recursively
    #[clap(short, long)]
    recursive: bool,
}

/// Inspect M8 files, or even entire directories for their contents
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let paths = if args.path.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.path.clone()
    };

    for entry in iter_files(&paths, args.recursive) {
        let path = entry.path();

        // One broken file shouldn't stop the rest of the walk
        match load(path) {
            Ok(file) => println!(
                "{:<40} | {:<10} | {:<6} | {}",
                path.display(),
                file.kind(),
                file.version(),
                name(&file)
            ),
            Err(error) => eprintln!("{:<40} | {error:#}", path.display()),
        }
    }

    Ok(())
}

fn name(file: &M8File) -> String {
    match file.body() {
        Body::Song(song) => song.name.to_string(),
        Body::Instrument(instrument) => instrument.name.to_string(),
        Body::Scale(scale) => scale.name.to_string(),
        Body::Theme(_) => "-".to_owned(),
    }
}
