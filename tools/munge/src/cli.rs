//! Command-line interface definitions for munge.

use std::path::PathBuf;

use clap::Parser;
use fsbench_report::{ParseMode, Reduction};

/// Munge raw fsbench CSV runs into per-test and master summary sheets.
///
/// Each input file holds one run; its name (minus extension and an optional
/// `-<digit>` run suffix) names the series. Sheets are written as
/// `<test>.csv` and `<master>.csv`.
#[derive(Parser)]
#[command(name = "munge", version, about)]
pub struct Cli {
    /// Raw run files, e.g. `ORIG/*.csv`.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Report configuration (default: `munge.toml` in the working directory
    /// if present, otherwise the built-in layout).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Column parsing mode: numeric or raw (overrides the config).
    #[arg(long)]
    pub mode: Option<ParseMode>,

    /// Reduction applied to repeated runs: min or max (overrides the config).
    #[arg(long = "reduce")]
    pub reduction: Option<Reduction>,

    /// Directory the sheets are written to.
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Print raw samples and their reductions instead of writing sheets.
    #[arg(long)]
    pub dump: bool,

    /// Skip master summary sheets.
    #[arg(long)]
    pub no_master: bool,

    /// Only print errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print per-file ingestion details, skipped tests and timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
