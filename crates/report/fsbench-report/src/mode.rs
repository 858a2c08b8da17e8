//! Parsing modes for the `param` and `value` columns.
//!
//! A run is processed entirely in one mode. [`Numeric`] parses parameters as
//! integers and values as floats, so ordering and reduction are numeric.
//! [`Raw`] keeps both columns as strings, so ordering and reduction are
//! lexicographic (`"100" < "20"`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Parsing mode selected once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Integer parameters, floating point values.
    #[default]
    Numeric,
    /// Both columns kept verbatim.
    Raw,
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(Self::Numeric),
            "raw" => Ok(Self::Raw),
            other => Err(format!("unknown mode '{other}' (expected numeric or raw)")),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

/// Binds the concrete parameter and value types of a parsing mode.
pub trait Mode {
    /// Benchmark parameter (thread count, block size, ...).
    type Param: Ord + Clone + fmt::Display;
    /// Measured value.
    type Value: Ord + Clone + fmt::Debug + fmt::Display;

    /// Parse the parameter column.
    fn parse_param(s: &str) -> Result<Self::Param, String>;
    /// Parse the value column.
    fn parse_value(s: &str) -> Result<Self::Value, String>;
    /// Render a value for a report cell.
    fn format_value(v: &Self::Value) -> String;
}

/// Integer parameters and floating point measurements.
#[derive(Debug, Clone, Copy)]
pub enum Numeric {}

/// Verbatim string parameters and values.
#[derive(Debug, Clone, Copy)]
pub enum Raw {}

/// A floating point measurement with a total order.
#[derive(Debug, Clone, Copy)]
pub struct Measurement(pub f64);

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Measurement {}

impl PartialOrd for Measurement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Measurement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Shows the value as parsed, keeping a trailing `.0` on whole numbers.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Mode for Numeric {
    type Param = i64;
    type Value = Measurement;

    fn parse_param(s: &str) -> Result<i64, String> {
        s.trim()
            .parse()
            .map_err(|e| format!("invalid integer parameter '{s}': {e}"))
    }

    fn parse_value(s: &str) -> Result<Measurement, String> {
        s.trim()
            .parse()
            .map(Measurement)
            .map_err(|e| format!("invalid numeric value '{s}': {e}"))
    }

    fn format_value(v: &Measurement) -> String {
        format!("{:.2}", v.0)
    }
}

impl Mode for Raw {
    type Param = String;
    type Value = String;

    fn parse_param(s: &str) -> Result<String, String> {
        Ok(s.to_string())
    }

    fn parse_value(s: &str) -> Result<String, String> {
        Ok(s.to_string())
    }

    fn format_value(v: &String) -> String {
        v.clone()
    }
}
