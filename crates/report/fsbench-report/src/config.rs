//! Report configuration.
//!
//! Loaded from `munge.toml` when present. Every key is optional; a missing
//! key keeps the built-in value, which reproduces the WinFsp performance
//! report. An empty `series` or `tests` list means "everything ingested,
//! sorted".
//!
//! ```toml
//! mode = "numeric"        # or "raw"
//! reduction = "min"       # or "max"
//! series = ["ntfs", "winfsp-t0", "dokany"]
//! tests = ["file_create_test", "file_open_test"]
//!
//! [[master]]
//! name = "file_tests"
//! tests = ["file_create_test", "file_open_test"]
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result, io_at};
use crate::master::MasterReport;
use crate::mode::ParseMode;
use crate::reduce::Reduction;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "munge.toml";

/// Series in chart order.
pub const DEFAULT_SERIES: &[&str] = &["ntfs", "winfsp-t0", "winfsp-t1", "winfsp-tinf", "dokany"];

/// File operation tests.
pub const FILE_TESTS: &[&str] = &[
    "file_create_test",
    "file_open_test",
    "file_overwrite_test",
    "file_list_test",
    "file_delete_test",
];

/// Read/write and memory-mapped I/O tests.
pub const RDWR_TESTS: &[&str] = &[
    "rdwr_cc_read_page_test",
    "rdwr_cc_write_page_test",
    "rdwr_nc_read_page_test",
    "rdwr_nc_write_page_test",
    "mmap_read_test",
    "mmap_write_test",
];

/// Everything that shapes a report run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportConfig {
    /// How the param and value columns are parsed.
    pub mode: ParseMode,
    /// How repeated samples are reduced.
    pub reduction: Reduction,
    /// Series in block order.
    pub series: Vec<String>,
    /// Tests that get a per-test report, in order.
    pub tests: Vec<String>,
    /// Master summaries, `[[master]]` tables.
    #[serde(rename = "master")]
    pub masters: Vec<MasterReport>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            reduction: Reduction::default(),
            series: to_strings(DEFAULT_SERIES),
            tests: to_strings(FILE_TESTS)
                .into_iter()
                .chain(to_strings(RDWR_TESTS))
                .collect(),
            masters: vec![
                MasterReport::new("file_tests", FILE_TESTS),
                MasterReport::new("rdwr_tests", RDWR_TESTS),
            ],
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check master report names: non-empty, unique, usable as file names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for report in &self.masters {
            let name = report.name.as_str();
            if name.is_empty() {
                return Err(ReportError::Config("master report with empty name".into()));
            }
            if name.contains(['/', '\\']) {
                return Err(ReportError::Config(format!(
                    "master report name '{name}' must not contain a path separator"
                )));
            }
            if !seen.insert(name) {
                return Err(ReportError::Config(format!(
                    "duplicate master report '{name}'"
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let text = std::fs::read_to_string(path).map_err(io_at(path))?;
    ReportConfig::from_toml(&text).map_err(|e| match e {
        ReportError::Config(msg) => ReportError::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Locate `munge.toml` in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|&n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reproduces_performance_report() {
        let config = ReportConfig::default();
        assert_eq!(config.mode, ParseMode::Numeric);
        assert_eq!(config.reduction, Reduction::Min);
        assert_eq!(config.series.len(), 5);
        assert_eq!(config.tests.len(), FILE_TESTS.len() + RDWR_TESTS.len());
        assert_eq!(config.tests[0], "file_create_test");
        assert_eq!(config.masters[1].name, "rdwr_tests");
        assert_eq!(config.masters[1].tests.len(), RDWR_TESTS.len());
    }

    #[test]
    fn shipped_configs_match_builtin_layouts() {
        let numeric =
            ReportConfig::from_toml(include_str!("../../../../configs/performance-testing.toml"))
                .unwrap();
        assert_eq!(numeric, ReportConfig::default());

        let raw = ReportConfig::from_toml(include_str!("../../../../configs/perf-tests.toml"))
            .unwrap();
        assert_eq!(raw.mode, ParseMode::Raw);
        assert!(raw.tests.is_empty());
        assert!(raw.masters.is_empty());
        assert!(raw.series.contains(&"winfsp-inf".to_string()));
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = ReportConfig::from_toml("reduction = \"max\"\n").unwrap();
        assert_eq!(config.reduction, Reduction::Max);
        assert_eq!(config.series, ReportConfig::default().series);
        assert_eq!(config.masters.len(), 2);
    }

    #[test]
    fn raw_layout_without_masters() {
        let text = r#"
mode = "raw"
series = ["ntfs", "winfsp-inf"]
tests = []
master = []
"#;
        let config = ReportConfig::from_toml(text).unwrap();
        assert_eq!(config.mode, ParseMode::Raw);
        assert_eq!(config.series, vec!["ntfs", "winfsp-inf"]);
        assert!(config.tests.is_empty());
        assert!(config.masters.is_empty());
    }

    #[test]
    fn master_tables_parse() {
        let text = r#"
[[master]]
name = "all_tests"

[[master]]
name = "creates"
tests = ["file_create_test"]
"#;
        let config = ReportConfig::from_toml(text).unwrap();
        assert_eq!(config.masters.len(), 2);
        assert!(config.masters[0].tests.is_empty());
        assert_eq!(config.masters[1].tests, vec!["file_create_test"]);
    }

    #[test]
    fn duplicate_master_names_are_rejected() {
        let text = "[[master]]\nname = \"a\"\n[[master]]\nname = \"a\"\n";
        assert!(matches!(
            ReportConfig::from_toml(text),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ReportConfig::from_toml("colour = \"red\"\n").is_err());
        assert!(ReportConfig::from_toml("mode = \"float\"\n").is_err());
    }
}
