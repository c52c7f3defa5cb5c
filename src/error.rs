//! Error handling for the paramref documentation build library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! All domain errors are load-time failures: a bad parameter document must
//! abort the documentation build with a message naming the offending key.
//!
//! # Examples
//!
//! ```
//! use paramref::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for paramref operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for paramref operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// A merge directive names a base that does not exist in the table
    #[error("parameter '{key}' references unknown base '{target}'")]
    Reference {
        /// The parameter carrying the merge directive
        key: String,
        /// The missing base name
        target: String,
    },

    /// A chain of merge directives loops back on itself
    #[error("circular merge chain: {}", chain.join(" -> "))]
    Cycle {
        /// The offending chain, first key repeated at the end
        chain: Vec<String>,
    },

    /// A descriptor is still missing a field after merge resolution
    #[error("parameter '{key}' is missing '{field}' after merge resolution")]
    Descriptor {
        /// The incomplete parameter
        key: String,
        /// The wire name of the missing field
        field: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new unresolved-reference error
    pub fn reference<S: Into<String>>(key: S, target: S) -> Self {
        Self::Reference {
            key: key.into(),
            target: target.into(),
        }
    }

    /// Create a new incomplete-descriptor error
    pub fn descriptor<S: Into<String>>(key: S, field: &'static str) -> Self {
        Self::Descriptor {
            key: key.into(),
            field,
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}
