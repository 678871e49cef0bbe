use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::query::DEFAULT_TOP_N;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Every field is optional in the file; absent ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Indicator table to load at startup.
    pub data_path: PathBuf,
    /// Header of the column identifying each row.
    pub key_column: String,
    /// Number of bars in the ranking chart.
    pub top_n: usize,
    /// Window title.
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/country_profile_variables.csv"),
            key_column: "country".to_string(),
            top_n: DEFAULT_TOP_N,
            title: "UN Country Profiles Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let config = DashboardConfig::load_or_default(Path::new("no/such/dashboard.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.key_column, "country");
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "data_path": "indicators.parquet", "top_n": 5 }}"#).unwrap();

        let config = DashboardConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("indicators.parquet"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.key_column, "country");
        assert_eq!(config.title, DashboardConfig::default().title);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "top_n = 5").unwrap();

        let err = DashboardConfig::load_or_default(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}
