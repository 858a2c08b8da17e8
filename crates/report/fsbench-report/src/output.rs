//! Plain-text dump of the grouped samples.
//!
//! Shows every raw value next to its reduction, which is the quickest way
//! to spot a noisy run before charting:
//!
//! ```text
//! file_create_test:
//!     ntfs:
//!         100: [5.0, 3.0] -> 3.00
//! ```

use std::io::{self, Write};

use crate::config::ReportConfig;
use crate::grouped::GroupedData;
use crate::mode::Mode;
use crate::reduce::Reducer;

/// Write the dump for every reported test and series.
///
/// Uses the same test and series order as the per-test reports; tests and
/// series without data are left out.
pub fn write_dump<M, R, W>(
    data: &GroupedData<M>,
    config: &ReportConfig,
    reducer: &R,
    out: &mut W,
) -> io::Result<()>
where
    M: Mode,
    R: Reducer<M::Value> + ?Sized,
    W: Write + ?Sized,
{
    let series = data.ordered_series(&config.series);

    for test in data.ordered_tests(&config.tests) {
        if !data.has_test(test) {
            continue;
        }
        writeln!(out, "{test}:")?;

        for &name in &series {
            let Some(params) = data.params(test, name) else {
                continue;
            };
            writeln!(out, "    {name}:")?;

            for (param, values) in params {
                let list = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let reduced = reducer
                    .reduce(values)
                    .map(|v| M::format_value(&v))
                    .unwrap_or_default();
                writeln!(out, "        {param}: [{list}] -> {reduced}")?;
            }
        }
    }

    Ok(())
}
