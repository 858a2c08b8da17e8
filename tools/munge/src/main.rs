//! Benchmark report munger.
//!
//! Turns raw fsbench CSV runs into sheets a charting tool can plot
//! directly.
//!
//! Pipeline: resolve config → ingest all runs → write per-test sheets →
//!           write master summaries.

mod cli;
mod munge;
mod verbose;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    // The dump owns stdout.
    verbose::init(cli.quiet || cli.dump, cli.verbose && !cli.dump);

    munge::run(&cli)
}
