//! CSV sheet output in the layout charting tools expect.
//!
//! A sheet is a sequence of blocks. Each block starts with a `//<label>`
//! comment row followed by two-column `key,value` rows. Lines end in CRLF.
//! Fields are written verbatim, never quoted, so every comment row starts
//! with `//` whatever its label holds.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result, io_at};

/// Prefix marking a comment row.
pub const COMMENT_PREFIX: &str = "//";

/// A CSV sheet being written to `W`.
pub struct Sheet<W: Write> {
    wtr: csv::Writer<W>,
    path: PathBuf,
}

impl Sheet<File> {
    /// Create (or truncate) the sheet file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(io_at(path))?;
        Ok(Self::from_writer(path, file))
    }
}

impl<W: Write> Sheet<W> {
    /// Write a sheet to an arbitrary writer. `path` only names it in errors.
    pub fn from_writer(path: impl Into<PathBuf>, out: W) -> Self {
        let wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Never)
            .flexible(true)
            .from_writer(out);
        Self {
            wtr,
            path: path.into(),
        }
    }

    /// Write a `//<label>` comment row.
    pub fn comment(&mut self, label: &str) -> Result<()> {
        let row = format!("{COMMENT_PREFIX}{label}");
        self.wtr.write_record([row.as_str()]).map_err(|e| self.csv_err(e))
    }

    /// Write a `key,value` data row.
    pub fn row(&mut self, key: &str, value: &str) -> Result<()> {
        self.wtr.write_record([key, value]).map_err(|e| self.csv_err(e))
    }

    /// Flush buffered rows and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        let path = self.path;
        self.wtr.into_inner().map_err(|e| ReportError::Io {
            path,
            source: e.into_error(),
        })
    }

    fn csv_err(&self, source: csv::Error) -> ReportError {
        ReportError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
