//! Configuration management for documentation builds.
//!
//! This module defines the `Config` struct used to drive a documentation
//! build. The configuration can be loaded from a YAML file or created
//! programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use paramref::config::Config;
//!
//! // Create a new config programmatically
//! let mut config = Config::new("parameters.yaml", "build/parameters.inc");
//! config.format = "html".to_string();
//!
//! // Or load from a config file
//! let config = Config::from_file("paramref.yaml").unwrap();
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Configuration for a documentation build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the parameter document
    pub parameters_path: String,

    /// Path the rendered rows are written to
    pub output_path: String,

    /// Render format ("rst" or "html")
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional table caption
    #[serde(default)]
    pub title: Option<String>,

    /// List of parameters to include (empty means all)
    #[serde(default)]
    pub include_params: Vec<String>,

    /// List of parameters to exclude
    #[serde(default)]
    pub exclude_params: Vec<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(parameters_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            parameters_path: parameters_path.into(),
            output_path: output_path.into(),
            format: default_format(),
            title: None,
            include_params: Vec::new(),
            exclude_params: Vec::new(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_format() -> String {
    "rst".to_string()
}
