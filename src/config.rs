//! Dashboard configuration loaded from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source column names of the rental CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub date: String,
    pub hour: String,
    pub weekday: String,
    pub season: String,
    pub casual: String,
    pub registered: String,
    pub total: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date: "dteday".to_string(),
            hour: "hr".to_string(),
            weekday: "weekday".to_string(),
            season: "season".to_string(),
            casual: "casual".to_string(),
            registered: "registered".to_string(),
            total: "cnt".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn source_names(&self) -> [&str; 7] {
        [
            self.date.as_str(),
            self.hour.as_str(),
            self.weekday.as_str(),
            self.season.as_str(),
            self.casual.as_str(),
            self.registered.as_str(),
            self.total.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMapping,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("preprocessed_hour.csv"),
            columns: ColumnMapping::default(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "data_path": "data/hour.csv", "columns": {{ "total": "count" }} }}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/hour.csv"));
        assert_eq!(config.columns.total, "count");
        assert_eq!(config.columns.date, "dteday");
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = DashboardConfig::load(Path::new("/nonexistent/dashboard.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
