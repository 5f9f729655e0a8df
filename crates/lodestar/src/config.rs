// File: src/config.rs
// Purpose: Navigation configuration, loadable from lodestar.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which targets receive externally supplied parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterResolveMode {
    /// Parameter resolution is disabled; resolve calls report not-handled.
    None,
    /// Bind parameters onto the view-model only.
    #[default]
    ViewModelOnly,
    /// Bind the view's own declared parameters first, then the view-model's.
    ViewAndViewModel,
}

/// Navigation subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Base path prefixed to every resolved route (e.g. "/app")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Which targets receive externally supplied parameters
    #[serde(default)]
    pub resolve_mode: ParameterResolveMode,

    /// CSS class applied to links matching the current location
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

fn default_active_class() -> String {
    "active".to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            resolve_mode: ParameterResolveMode::default(),
            active_class: default_active_class(),
        }
    }
}

impl NavigationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: NavigationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from the default path (./lodestar.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("lodestar.toml")
    }
}
