//! Per-test pivot reports.
//!
//! One `<test>.csv` per test. Each series with data for the test gets a
//! block: a `//<series>` comment row, then one `<param>,<value>` row per
//! parameter in ascending order, with the value reduced over all runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::grouped::GroupedData;
use crate::mode::Mode;
use crate::reduce::Reducer;
use crate::sheet::Sheet;

/// Render the pivot of one test into `sheet`.
///
/// Series without data for `test` are skipped. Returns the number of series
/// blocks written.
pub fn render_test<M, R, W>(
    data: &GroupedData<M>,
    test: &str,
    series: &[&str],
    reducer: &R,
    sheet: &mut Sheet<W>,
) -> Result<usize>
where
    M: Mode,
    R: Reducer<M::Value> + ?Sized,
    W: Write,
{
    let mut blocks = 0;
    for &name in series {
        let Some(params) = data.params(test, name) else {
            continue;
        };

        sheet.comment(name)?;
        for (param, values) in params {
            if let Some(value) = reducer.reduce(values) {
                sheet.row(&param.to_string(), &M::format_value(&value))?;
            }
        }
        blocks += 1;
    }
    Ok(blocks)
}

/// Write `<out_dir>/<test>.csv` for every reported test.
///
/// Tests come from the configured list, or every ingested test (sorted)
/// when the list is empty. A listed test that no run recorded produces no
/// file. Returns the paths written, in order.
pub fn write_test_reports<M, R>(
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
    let mut written = Vec::new();

    for test in data.ordered_tests(&config.tests) {
        if !data.has_test(test) {
            continue;
        }

        let path = out_dir.join(format!("{test}.csv"));
        let mut sheet = Sheet::create(&path)?;
        render_test(data, test, &series, reducer, &mut sheet)?;
        sheet.finish()?;
        written.push(path);
    }

    Ok(written)
}
