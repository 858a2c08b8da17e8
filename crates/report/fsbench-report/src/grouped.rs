//! Grouped sample store.
//!
//! Samples are keyed `test -> series -> param -> [values]`. The outer maps
//! are ordered, so discovery order is always sorted and two runs over the
//! same inputs produce identical reports. The value list keeps ingestion
//! order and is never empty: it is only created when a sample arrives.
//!
//! The store is filled once by [`GroupedData::ingest`] (directly or through
//! [`GroupedData::ingest_file`]) and afterwards only read.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result, io_at};
use crate::mode::Mode;
use crate::reduce::Reducer;
use crate::series;

/// Samples for one (test, series) pair, keyed by ascending parameter.
pub type ParamMap<M> = BTreeMap<<M as Mode>::Param, Vec<<M as Mode>::Value>>;

/// Samples for one test, keyed by series name.
pub type SeriesMap<M> = BTreeMap<String, ParamMap<M>>;

/// A single parsed measurement.
pub struct Sample<M: Mode> {
    /// Benchmark test name.
    pub test: String,
    /// Series (implementation) name.
    pub series: String,
    /// Benchmark parameter.
    pub param: M::Param,
    /// Measured value.
    pub value: M::Value,
}

/// All ingested samples, grouped by test, series and parameter.
pub struct GroupedData<M: Mode> {
    tests: BTreeMap<String, SeriesMap<M>>,
    samples: usize,
}

impl<M: Mode> Default for GroupedData<M> {
    fn default() -> Self {
        Self {
            tests: BTreeMap::new(),
            samples: 0,
        }
    }
}

impl<M: Mode> GroupedData<M> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample, appending to the value list of its triple.
    pub fn ingest(&mut self, sample: Sample<M>) {
        self.tests
            .entry(sample.test)
            .or_default()
            .entry(sample.series)
            .or_default()
            .entry(sample.param)
            .or_default()
            .push(sample.value);
        self.samples += 1;
    }

    /// Ingest every row of a headerless `test,param,value` CSV stream.
    ///
    /// `input` names the stream in error messages. The first bad row aborts
    /// ingestion; rows before it stay recorded. An empty line is a bad row.
    /// Returns the number of rows read.
    pub fn ingest_reader<R: Read>(
        &mut self,
        input: &str,
        series: &str,
        mut reader: R,
    ) -> Result<usize> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(io_at(input))?;
        let blank = first_blank_line(&buf);

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(buf.as_slice());
        let mut record = csv::StringRecord::new();

        let mut rows = 0;
        let mut start = 0;
        let mut lines = LineCounter::default();
        loop {
            let more = rdr.read_record(&mut record).map_err(|source| ReportError::Csv {
                path: PathBuf::from(input),
                source,
            })?;
            let end = usize::try_from(rdr.position().byte()).unwrap_or(buf.len());

            // Empty lines never surface as records; fail once a read passes one.
            if let Some((line, _)) = blank.filter(|&(_, at)| !more || end > at) {
                return Err(ReportError::MalformedRow {
                    input: input.to_string(),
                    line,
                    reason: "empty row".to_string(),
                });
            }
            if !more {
                break;
            }

            let line = lines.line_at(&buf, start);
            start = end;
            let malformed = |reason: String| ReportError::MalformedRow {
                input: input.to_string(),
                line,
                reason,
            };

            if record.len() != 3 {
                return Err(malformed(format!(
                    "expected 3 columns (test,param,value), found {}",
                    record.len()
                )));
            }

            let param = M::parse_param(&record[1]).map_err(malformed)?;
            let value = M::parse_value(&record[2]).map_err(malformed)?;
            self.ingest(Sample {
                test: record[0].to_string(),
                series: series.to_string(),
                param,
                value,
            });
            rows += 1;
        }

        Ok(rows)
    }

    /// Ingest one run file, deriving its series from the file name.
    ///
    /// Returns the series name and the number of rows read.
    pub fn ingest_file(&mut self, path: &Path) -> Result<(String, usize)> {
        let series = series::series_name(path)?;
        let file = File::open(path).map_err(io_at(path))?;
        let rows = self.ingest_reader(&path.display().to_string(), &series, file)?;
        Ok((series, rows))
    }

    /// Returns `true` if nothing has been ingested.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Total number of samples ingested.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// All test names, sorted.
    pub fn tests(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// Returns `true` if any series recorded data for `test`.
    pub fn has_test(&self, test: &str) -> bool {
        self.tests.contains_key(test)
    }

    /// All series names seen for any test, sorted.
    pub fn discovered_series(&self) -> BTreeSet<&str> {
        self.tests
            .values()
            .flat_map(|series| series.keys().map(String::as_str))
            .collect()
    }

    /// Samples of one (test, series) pair, or `None` if the pair has no data.
    pub fn params(&self, test: &str, series: &str) -> Option<&ParamMap<M>> {
        self.tests.get(test)?.get(series)
    }

    /// Raw values recorded for one triple, in ingestion order.
    pub fn values(&self, test: &str, series: &str, param: &M::Param) -> Option<&[M::Value]> {
        self.params(test, series)?.get(param).map(Vec::as_slice)
    }

    /// Largest parameter recorded for a (test, series) pair.
    pub fn largest_param(&self, test: &str, series: &str) -> Option<&M::Param> {
        self.params(test, series)?.keys().next_back()
    }

    /// Reduce the values of one triple to a single value.
    ///
    /// Computed on every call; nothing is cached.
    pub fn aggregate<R>(
        &self,
        test: &str,
        series: &str,
        param: &M::Param,
        reducer: &R,
    ) -> Option<M::Value>
    where
        R: Reducer<M::Value> + ?Sized,
    {
        reducer.reduce(self.values(test, series, param)?)
    }

    /// Test iteration order: the listed tests, or every test sorted when the
    /// list is empty. Listed tests without data are kept; callers skip them.
    pub fn ordered_tests<'a>(&'a self, listed: &'a [String]) -> Vec<&'a str> {
        if listed.is_empty() {
            self.tests().collect()
        } else {
            listed.iter().map(String::as_str).collect()
        }
    }

    /// Series iteration order: the listed series, or every series sorted
    /// when the list is empty.
    pub fn ordered_series<'a>(&'a self, listed: &'a [String]) -> Vec<&'a str> {
        if listed.is_empty() {
            self.discovered_series().into_iter().collect()
        } else {
            listed.iter().map(String::as_str).collect()
        }
    }
}

/// 1-based line number and byte offset of the first empty line that is not
/// inside a quoted field. The empty tail after a final newline is not a line.
fn first_blank_line(buf: &[u8]) -> Option<(u64, usize)> {
    let mut quoted = false;
    let mut line = 1;
    let mut line_start = 0;
    for (i, &b) in buf.iter().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            b'\n' => {
                if !quoted && matches!(&buf[line_start..i], [] | [b'\r']) {
                    return Some((line, line_start));
                }
                line += 1;
                line_start = i + 1;
            }
            _ => {}
        }
    }
    None
}

/// Maps record start offsets to line numbers, scanning each byte once.
#[derive(Default)]
struct LineCounter {
    newlines: u64,
    scanned: usize,
}

impl LineCounter {
    /// Line of the first byte at or after `offset` that is not a line
    /// terminator. Offsets must not decrease between calls.
    fn line_at(&mut self, buf: &[u8], offset: usize) -> u64 {
        let first = buf[offset..]
            .iter()
            .position(|b| !matches!(b, b'\r' | b'\n'))
            .map_or(buf.len(), |i| offset + i);
        self.newlines += buf[self.scanned..first]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u64;
        self.scanned = first;
        self.newlines + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{Measurement, Numeric, Raw};
    use crate::reduce::Reduction;

    fn numeric(rows: &[(&str, &str)]) -> GroupedData<Numeric> {
        let mut data = GroupedData::new();
        for (series, text) in rows {
            data.ingest_reader("mem", series, text.as_bytes()).unwrap();
        }
        data
    }

    #[test]
    fn repeated_runs_collect_in_one_leaf() {
        let data = numeric(&[
            ("ntfs", "file_create_test,100,5.0\n"),
            ("ntfs", "file_create_test,100,3.0\n"),
        ]);
        assert_eq!(
            data.values("file_create_test", "ntfs", &100).unwrap(),
            &[Measurement(5.0), Measurement(3.0)]
        );
        assert_eq!(
            data.aggregate("file_create_test", "ntfs", &100, &Reduction::Min),
            Some(Measurement(3.0))
        );
        assert_eq!(data.sample_count(), 2);
    }

    #[test]
    fn input_order_does_not_change_aggregate() {
        let a = numeric(&[("s", "t,1,2.5\nt,1,1.5\n"), ("s", "t,1,9.0\n")]);
        let b = numeric(&[("s", "t,1,9.0\n"), ("s", "t,1,1.5\nt,1,2.5\n")]);
        assert_eq!(
            a.aggregate("t", "s", &1, &Reduction::Min),
            b.aggregate("t", "s", &1, &Reduction::Min)
        );
    }

    #[test]
    fn params_are_sorted_numerically() {
        let data = numeric(&[("s", "t,100,1\nt,20,1\nt,3,1\n")]);
        let params: Vec<i64> = data.params("t", "s").unwrap().keys().copied().collect();
        assert_eq!(params, vec![3, 20, 100]);
        assert_eq!(data.largest_param("t", "s"), Some(&100));
    }

    #[test]
    fn raw_params_are_sorted_lexicographically() {
        let mut data = GroupedData::<Raw>::new();
        data.ingest_reader("mem", "s", "t,100,1\nt,20,1\n".as_bytes())
            .unwrap();
        assert_eq!(data.largest_param("t", "s").map(String::as_str), Some("20"));
    }

    #[test]
    fn wrong_column_count_aborts() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_reader("run.csv", "s", "t,1,2.0\nt,1\nt,2,3.0\n".as_bytes())
            .unwrap_err();
        match err {
            ReportError::MalformedRow { input, line, .. } => {
                assert_eq!(input, "run.csv");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The row before the bad one was recorded; the one after was not.
        assert!(data.values("t", "s", &1).is_some());
        assert!(data.values("t", "s", &2).is_none());
    }

    #[test]
    fn empty_line_aborts() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_reader("run.csv", "s", "t,1,2.0\n\nt,2,3.0\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 2, .. }));
        assert!(data.values("t", "s", &1).is_some());
        assert!(data.values("t", "s", &2).is_none());
    }

    #[test]
    fn empty_line_aborts_with_crlf_and_at_end() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_reader("run.csv", "s", "t,1,2.0\r\nt,2,3.0\r\n\r\nt,3,4.0\r\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 3, .. }));
        assert_eq!(data.sample_count(), 2);

        let err = data
            .ingest_reader("tail.csv", "s", "t,4,1.0\n\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn final_newline_and_quoted_line_breaks_are_not_empty_rows() {
        let mut data = GroupedData::<Raw>::new();
        let rows = data
            .ingest_reader("run.csv", "s", "\"a\n\nb\",1,x\r\nt,2,y\r\n".as_bytes())
            .unwrap();
        assert_eq!(rows, 2);
        assert!(data.has_test("a\n\nb"));
    }

    #[test]
    fn crlf_rows_report_their_own_line() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_reader("run.csv", "s", "t,1,2.0\r\nt,2,3.0\r\nt,3\r\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn non_numeric_value_aborts_in_numeric_mode() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_reader("run.csv", "s", "t,1,slow\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn raw_mode_accepts_any_text() {
        let mut data = GroupedData::<Raw>::new();
        let rows = data
            .ingest_reader("run.csv", "s", "t,big,slow\n".as_bytes())
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            data.aggregate("t", "s", &"big".to_string(), &Reduction::Min),
            Some("slow".to_string())
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut data = GroupedData::<Numeric>::new();
        let err = data
            .ingest_file(Path::new("/nonexistent/dir/ntfs-1.csv"))
            .unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn ordering_falls_back_to_discovery() {
        let data = numeric(&[("b", "y,1,1\n"), ("a", "x,1,1\n")]);
        assert_eq!(data.ordered_tests(&[]), vec!["x", "y"]);
        assert_eq!(data.ordered_series(&[]), vec!["a", "b"]);

        let listed = vec!["b".to_string(), "zz".to_string()];
        assert_eq!(data.ordered_series(&listed), vec!["b", "zz"]);
    }
}
