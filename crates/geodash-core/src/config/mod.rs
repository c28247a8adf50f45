//! Dashboard configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::PageSizeOptions;
use crate::record::LatLon;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Map camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Center shown before anything is selected
    pub initial_center: LatLon,

    pub initial_zoom: u8,

    /// Zoom used when recentering on a selected record
    pub selection_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_center: LatLon::new(13.0827, 80.2707),
            initial_zoom: 10,
            selection_zoom: 12,
        }
    }
}

/// Top-level dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Sizes offered by the rows-per-page selector
    pub page_size_options: PageSizeOptions,

    pub default_page_size: usize,

    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size_options: PageSizeOptions::default(),
            default_page_size: 10,
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = self.page_size_options.sizes();
        if sizes.is_empty() {
            return Err(ConfigError::Invalid("page_size_options is empty".to_string()));
        }
        if sizes.contains(&0) {
            return Err(ConfigError::Invalid("page sizes must be positive".to_string()));
        }
        if !self.page_size_options.contains(self.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, sizes
            )));
        }
        if !self.map.initial_center.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "map.initial_center {} is out of range",
                self.map.initial_center
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size_options.sizes(), &[10, 25, 100]);
        assert_eq!(config.map.selection_zoom, 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DashboardConfig::from_json(
            r#"{ "page_size_options": [5, 50], "default_page_size": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.default_page_size, 5);
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn test_default_size_must_be_allowed() {
        let err = DashboardConfig::from_json(r#"{ "default_page_size": 7 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = DashboardConfig::from_json(r#"{ "page_size_options": [] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "map": {{ "selection_zoom": 15 }} }}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.map.selection_zoom, 15);
        assert_eq!(config.map.initial_zoom, 10);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            DashboardConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
