//! Command-line argument definitions for the `itinera` binary.

use std::path::PathBuf;

use clap::Parser;

/// Render a trip itinerary (JSON) to a PDF
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the itinerary JSON. Reads stdin when omitted.
    #[arg(conflicts_with = "example")]
    pub input: Option<PathBuf>,

    /// Exact output path. Defaults to `{destination}_Itinerary.pdf` inside `--dir`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the derived output filename
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Path to template configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the destination as the filename stem without cleaning it up
    #[arg(long)]
    pub verbatim_filename: bool,

    /// Skip the completeness checks the form performs
    #[arg(long)]
    pub no_validate: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print a sample itinerary JSON and exit
    #[arg(long)]
    pub example: bool,
}
