//! Configuration module, loads the selector mapping from a JSON file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Selector mapping configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// Maps filter selectors to backend column names. The JSON file is a flat
/// object, e.g. `{"author": "users.name"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorMappingConfig {
    #[serde(flatten)]
    pub mappings: HashMap<String, String>,
}

impl SelectorMappingConfig {
    /// Load a selector mapping from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "config file does not exist: {}",
                path_ref.display()
            )));
        }

        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!(
                "cannot read config file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        let mappings: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| {
                ConfigError::new(format!(
                    "cannot parse JSON config file {}: {}",
                    path_ref.display(),
                    e
                ))
            })?;

        Ok(SelectorMappingConfig { mappings })
    }

    /// The column a selector maps to; an unmapped selector passes through
    /// unchanged so that unconfigured deployments keep the raw selector
    /// names in the rendered SQL.
    pub fn get_column(&self, selector: &str) -> String {
        self.mappings
            .get(selector)
            .cloned()
            .unwrap_or_else(|| selector.to_string())
    }

    pub fn get_mappings(&self) -> &HashMap<String, String> {
        &self.mappings
    }
}
