//! The `export` subcommand

use crate::utils::{check_for_overwrite, load};
use anyhow::{Context, Result};
use clap::Args;
use std::{fs::File, io::BufWriter, path::PathBuf};

/// Arguments for the `export` subcommand
#[derive(Args)]
#[clap(author, version, about = "Export an M8 file to JSON", long_about = None)]
pub struct ExportArgs {
    /// The path to the M8 file to export
    path: PathBuf,

    /// The destination path. Defaults to the input path with a .json extension
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Leave out the file metadata (kind and version)
    ///
    /// Files exported without it cannot be imported again.
    #[clap(long)]
    skip_header: bool,

    /// Overwrite the output file if it already exists
    #[clap(short, long)]
    force: bool,
}

/// Export an M8 file to JSON
pub fn export(args: ExportArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| args.path.with_extension("json"));
    check_for_overwrite(&output, args.force)?;

    let file = load(&args.path)?;
    let object = file.to_object(args.skip_header);

    let writer = BufWriter::new(
        File::create(&output)
            .with_context(|| format!("Could not create {}", output.display()))?,
    );
    serde_json::to_writer_pretty(writer, &object).context("Could not write the JSON")?;

    println!(
        "{} ({} {}) => {}",
        args.path.display(),
        file.kind(),
        file.version(),
        output.display()
    );

    Ok(())
}
