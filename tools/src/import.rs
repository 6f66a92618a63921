//! The `import` subcommand

use crate::utils::check_for_overwrite;
use anyhow::{Context, Result};
use clap::Args;
use m8::{file::M8File, object::Object};
use std::{fs::File, io::BufReader, path::PathBuf};

/// Arguments for the `import` subcommand
#[derive(Args)]
#[clap(author, version, about = "Rebuild an M8 file from exported JSON", long_about = None)]
pub struct ImportArgs {
    /// The JSON file to import
    json: PathBuf,

    /// The output path. Defaults to the input path with the extension of the file kind
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[clap(short, long)]
    force: bool,
}

/// Rebuild an M8 file from exported JSON
pub fn import(args: ImportArgs) -> Result<()> {
    let reader = BufReader::new(
        File::open(&args.json)
            .with_context(|| format!("Could not open {}", args.json.display()))?,
    );

    let object: Object = serde_json::from_reader(reader)
        .with_context(|| format!("{} is not a JSON object", args.json.display()))?;

    let file = M8File::from_object(&object).context(
        "Could not rebuild the M8 file (was it exported with --skip-header?)",
    )?;

    let output = args
        .output
        .unwrap_or_else(|| args.json.with_extension(file.kind().extension()));
    check_for_overwrite(&output, args.force)?;

    file.to_path(&output)
        .with_context(|| format!("Could not write {}", output.display()))?;

    println!("Wrote {} ({} {})", output.display(), file.kind(), file.version());

    Ok(())
}
