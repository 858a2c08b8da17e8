//! The munge pipeline: resolve config, ingest every run, write sheets.
//!
//! All inputs are ingested before the first sheet is opened, so a bad row
//! or missing file aborts the run without touching the output directory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fsbench_report::config::{self, ReportConfig};
use fsbench_report::{GroupedData, Mode, Numeric, ParseMode, Raw, master, output, pivot};

use crate::cli::Cli;
use crate::verbose::{Timer, dprintln, vprintln};

/// Run the whole pipeline for the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    vprintln!("Mode: {}, reduction: {}", config.mode, config.reduction);

    match config.mode {
        ParseMode::Numeric => run_mode::<Numeric>(cli, &config),
        ParseMode::Raw => run_mode::<Raw>(cli, &config),
    }
}

/// Load the report configuration and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let path = cli
        .config
        .clone()
        .or_else(|| config::find_config(Path::new(".")));

    let mut config = match path {
        Some(path) => {
            vprintln!("Loading {}...", path.display());
            config::load_config(&path)
                .with_context(|| format!("loading report config {}", path.display()))?
        }
        None => ReportConfig::default(),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(reduction) = cli.reduction {
        config.reduction = reduction;
    }
    if cli.no_master {
        config.masters.clear();
    }
    Ok(config)
}

fn run_mode<M: Mode>(cli: &Cli, config: &ReportConfig) -> Result<()> {
    let data = ingest::<M>(&cli.inputs)?;
    let reducer = config.reduction;

    if cli.dump {
        let mut out = io::stdout().lock();
        output::write_dump(&data, config, &reducer, &mut out).context("writing dump")?;
        out.flush()?;
        return Ok(());
    }

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    let tests = {
        let _t = Timer::start("per-test sheets");
        pivot::write_test_reports(&data, config, &reducer, &cli.output_dir)?
    };
    report_written(&tests);
    for test in &config.tests {
        if !data.has_test(test) {
            vprintln!("  Skipping {test} (no samples)");
        }
    }

    let masters = {
        let _t = Timer::start("master sheets");
        master::write_master_reports(&data, config, &reducer, &cli.output_dir)?
    };
    report_written(&masters);

    dprintln!(
        "Wrote {} test sheets and {} master sheets to {}",
        tests.len(),
        masters.len(),
        cli.output_dir.display()
    );
    Ok(())
}

/// Ingest every input file in argument order.
fn ingest<M: Mode>(inputs: &[PathBuf]) -> Result<GroupedData<M>> {
    let _t = Timer::start("ingestion");
    let mut data = GroupedData::new();

    for path in inputs {
        let (series, rows) = data.ingest_file(path)?;
        vprintln!("  {} -> {series} ({rows} rows)", path.display());
    }

    dprintln!(
        "Ingested {} samples from {} files ({} tests, {} series)",
        data.sample_count(),
        inputs.len(),
        data.tests().count(),
        data.discovered_series().len()
    );
    Ok(data)
}

fn report_written(paths: &[PathBuf]) {
    for path in paths {
        vprintln!("  Wrote {}", path.display());
    }
}
