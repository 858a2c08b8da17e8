//! Series naming for run files.
//!
//! Every input file holds one run of one implementation. Repeated runs are
//! saved as `ntfs-1.csv`, `ntfs-2.csv`, ... and must land in the same
//! series, so the run suffix is dropped from the file stem.

use std::path::Path;

use crate::error::{ReportError, Result};

/// Derive the series name for a run file.
///
/// Takes the base name without its last extension and strips a trailing
/// `-<digit>` run suffix. Only a single digit is recognised: `foo-12`
/// stays `foo-12`.
pub fn series_name(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReportError::InvalidFileName(path.to_path_buf()))?;

    Ok(strip_run_suffix(stem).to_string())
}

/// Strip a trailing `-<digit>` from a file stem, if present.
pub fn strip_run_suffix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    match bytes {
        [.., b'-', last] if last.is_ascii_digit() => &stem[..stem.len() - 2],
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn repeated_runs_share_a_series() {
        assert_eq!(series_name(Path::new("ORIG/foo-1.csv")).unwrap(), "foo");
        assert_eq!(series_name(Path::new("ORIG/foo-2.csv")).unwrap(), "foo");
        assert_eq!(series_name(Path::new("winfsp-t0-2.csv")).unwrap(), "winfsp-t0");
    }

    #[test]
    fn multi_digit_run_number_is_kept() {
        assert_eq!(series_name(Path::new("foo-12.csv")).unwrap(), "foo-12");
    }

    #[test]
    fn names_without_run_suffix_are_untouched() {
        assert_eq!(series_name(Path::new("ntfs.csv")).unwrap(), "ntfs");
        assert_eq!(series_name(Path::new("winfsp-t0.csv")).unwrap(), "winfsp-t0");
        assert_eq!(series_name(Path::new("winfsp-tinf")).unwrap(), "winfsp-tinf");
        assert_eq!(series_name(Path::new("dokany1.csv")).unwrap(), "dokany1");
    }

    #[test]
    fn only_last_extension_is_removed() {
        assert_eq!(series_name(Path::new("run.v2-3.csv")).unwrap(), "run.v2");
    }

    #[test]
    fn short_stems() {
        assert_eq!(strip_run_suffix("7"), "7");
        assert_eq!(strip_run_suffix("-7"), "");
        assert_eq!(strip_run_suffix(""), "");
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let err = series_name(&PathBuf::from("/")).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFileName(_)));
    }
}
