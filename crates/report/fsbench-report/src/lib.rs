//! Filesystem benchmark report generation.
//!
//! Ingests raw `test,param,value` CSV runs (one file per run, named after
//! the series under test), groups repeated runs of the same configuration,
//! and emits pivoted CSV sheets for charting:
//!
//! - one sheet per test, with every series' reduced value at each
//!   parameter ([`pivot`]);
//! - master sheets condensing a test family to one value per series and
//!   test, taken at the largest parameter ([`master`]).
//!
//! Reductions are computed on demand from the grouped store; nothing is
//! cached between the two report kinds.

pub mod config;
pub mod error;
pub mod grouped;
pub mod master;
pub mod mode;
pub mod output;
pub mod pivot;
pub mod reduce;
pub mod series;
pub mod sheet;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use grouped::{GroupedData, Sample};
pub use master::MasterReport;
pub use mode::{Measurement, Mode, Numeric, ParseMode, Raw};
pub use reduce::{Reducer, Reduction};
