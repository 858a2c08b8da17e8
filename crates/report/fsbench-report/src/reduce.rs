//! Reduction of repeated samples to one representative value.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Collapses the samples recorded for one (test, series, param) triple.
///
/// Returns `None` only for an empty slice.
pub trait Reducer<V> {
    /// Reduce `values` to a single value.
    fn reduce(&self, values: &[V]) -> Option<V>;
}

impl<V, F> Reducer<V> for F
where
    F: Fn(&[V]) -> Option<V>,
{
    fn reduce(&self, values: &[V]) -> Option<V> {
        self(values)
    }
}

/// Built-in reductions, ordered by the mode's natural order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Smallest sample (best time for duration benchmarks).
    #[default]
    Min,
    /// Largest sample.
    Max,
}

impl<V: Ord + Clone> Reducer<V> for Reduction {
    fn reduce(&self, values: &[V]) -> Option<V> {
        match self {
            Self::Min => values.iter().min().cloned(),
            Self::Max => values.iter().max().cloned(),
        }
    }
}

impl FromStr for Reduction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(format!("unknown reduction '{other}' (expected min or max)")),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
        }
    }
}
