use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use m8_tools::export::{export, ExportArgs};
use m8_tools::import::{import, ImportArgs};
use m8_tools::inspect::{inspect, InspectArgs};
use m8_tools::view::{view, ViewArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    Inspect(InspectArgs),
    Export(ExportArgs),
    Import(ImportArgs),
    View(ViewArgs),
}

fn main() -> Result<()> {
    // Library diagnostics go to stderr, filtered through RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse_from(wild::args()) {
        Cli::Inspect(args) => inspect(&args),
        Cli::Export(args) => export(args),
        Cli::Import(args) => import(args),
        Cli::View(args) => view(args),
    }
}
