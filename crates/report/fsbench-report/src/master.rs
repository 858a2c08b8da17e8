//! Master summary reports.
//!
//! A master report condenses a family of tests into one headline number per
//! series and test: the reduced value at the largest parameter recorded for
//! that pair, where the workload is heaviest. Series form the outer blocks
//! and tests the rows, the inverse of the per-test pivot.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::grouped::GroupedData;
use crate::mode::Mode;
use crate::reduce::Reducer;
use crate::sheet::Sheet;

/// A test family summarised into `<name>.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MasterReport {
    /// Output base name.
    pub name: String,
    /// Tests in row order. Empty means every ingested test, sorted.
    #[serde(default)]
    pub tests: Vec<String>,
}

impl MasterReport {
    /// Create a master report over `tests`.
    pub fn new(name: &str, tests: &[&str]) -> Self {
        Self {
            name: name.into(),
            tests: tests.iter().map(|&t| t.into()).collect(),
        }
    }
}

/// Render one master report into `sheet`.
///
/// Every series gets a `//<series>` row, even when none of the family's
/// tests has data for it. Returns the number of data rows written.
pub fn render_master<M, R, W>(
    data: &GroupedData<M>,
    report: &MasterReport,
    series: &[&str],
    reducer: &R,
    sheet: &mut Sheet<W>,
) -> Result<usize>
where
    M: Mode,
    R: Reducer<M::Value> + ?Sized,
    W: Write,
{
    let tests = data.ordered_tests(&report.tests);
    let mut rows = 0;

    for &name in series {
        sheet.comment(name)?;
        for &test in &tests {
            let Some(param) = data.largest_param(test, name) else {
                continue;
            };
            if let Some(value) = data.aggregate(test, name, param, reducer) {
                sheet.row(test, &M::format_value(&value))?;
                rows += 1;
            }
        }
    }

    Ok(rows)
}

/// Write `<out_dir>/<name>.csv` for every configured master report.
///
/// Returns the paths written, in order.
pub fn write_master_reports<M, R>(
    data: &GroupedData<M>,
    config: &ReportConfig,
    reducer: &R,
    out_dir: &Path,
) -> Result<Vec<PathBuf>>
where
    M: Mode,
    R: Reducer<M::Value> + ?Sized,
{
    let series = data.ordered_series(&config.series);
    let mut written = Vec::with_capacity(config.masters.len());

    for report in &config.masters {
        let path = out_dir.join(format!("{}.csv", report.name));
        let mut sheet = Sheet::create(&path)?;
        render_master(data, report, &series, reducer, &mut sheet)?;
        sheet.finish()?;
        written.push(path);
    }

    Ok(written)
}
