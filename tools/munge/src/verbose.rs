//! Console output levels for munge.
//!
//! Three output levels controlled by CLI flags:
//! - **Quiet** (`-q`): errors only
//! - **Default** (no flag): ingestion and report summaries
//! - **Verbose** (`-v`): per-file details, skipped tests, phase timings

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

/// Global verbosity level, set once at startup.
static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Initialize the verbosity level for the current process.
pub fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        Verbosity::Quiet
    } else if verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Default
    };
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

fn verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Default,
    }
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    verbosity() == Verbosity::Verbose
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    verbosity() == Verbosity::Quiet
}

/// Print a message only when verbose mode is enabled.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// Print a message at default verbosity and above (suppressed in quiet mode).
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// RAII timer that prints elapsed duration on drop when verbose mode is active.
///
/// ```ignore
/// let _t = Timer::start("ingestion");
/// // ... work ...
/// // prints "  ingestion: 3.1ms" on drop
/// ```
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled phase.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            println!("  {}: {:.1?}", self.label, self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        init(true, true);
        assert!(is_quiet());
        assert!(!is_verbose());

        init(false, true);
        assert!(is_verbose());

        init(false, false);
        assert!(!is_quiet() && !is_verbose());
    }
}
