use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::loader::{OutOfRangePolicy, DEFAULT_SHEET, DEFAULT_SOURCE};

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "sa3_radar.json";

pub const ENV_SOURCE: &str = "SA3_RADAR_SOURCE";
pub const ENV_SHEET: &str = "SA3_RADAR_SHEET";

pub const DEFAULT_TITLE: &str = "PropwealthNext: SA3 Investment Radar Dashboard";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the region scores come from and how the window is titled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub source_path: PathBuf,
    pub sheet: String,
    pub out_of_range: OutOfRangePolicy,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
            sheet: DEFAULT_SHEET.to_string(),
            out_of_range: OutOfRangePolicy::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults, then [`CONFIG_FILE`] if present, then environment overrides.
    pub fn resolve() -> Result<Self> {
        let mut config = match Self::from_file(Path::new(CONFIG_FILE))? {
            Some(c) => {
                log::info!("Using settings from {CONFIG_FILE}");
                c
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    /// Apply `SA3_RADAR_*` overrides; `lookup` abstracts the environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(src) = lookup(ENV_SOURCE).filter(|s| !s.trim().is_empty()) {
            self.source_path = PathBuf::from(src);
        }
        if let Some(sheet) = lookup(ENV_SHEET).filter(|s| !s.trim().is_empty()) {
            self.sheet = sheet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_master_workbook() {
        let c = DashboardConfig::default();
        assert_eq!(c.source_path, PathBuf::from("Region Charts Master.xlsx"));
        assert_eq!(c.sheet, "Radar Sa3 Houses");
        assert_eq!(c.out_of_range, OutOfRangePolicy::Reject);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "source_path": "scores.csv", "out_of_range": "clamp" }}"#).unwrap();
        let c = DashboardConfig::from_file(f.path()).unwrap().unwrap();
        assert_eq!(c.source_path, PathBuf::from("scores.csv"));
        assert_eq!(c.out_of_range, OutOfRangePolicy::Clamp);
        assert_eq!(c.sheet, DEFAULT_SHEET);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "sheeet": "x" }}"#).unwrap();
        assert!(DashboardConfig::from_file(f.path()).is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let c = DashboardConfig::from_file(Path::new("does/not/exist.json")).unwrap();
        assert!(c.is_none());
    }

    #[test]
    fn environment_overrides_win() {
        let mut c = DashboardConfig::default();
        c.apply_overrides(|key| match key {
            ENV_SOURCE => Some("other.parquet".into()),
            ENV_SHEET => Some("  ".into()),
            _ => None,
        });
        assert_eq!(c.source_path, PathBuf::from("other.parquet"));
        assert_eq!(c.sheet, DEFAULT_SHEET);
    }
}
